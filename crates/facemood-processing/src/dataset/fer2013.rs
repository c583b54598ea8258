//! FER-2013 CSV to train/validation/test arrays.
//!
//! Input columns: `emotion` (class index), `pixels` (2304 space-separated
//! bytes, row-major 48x48) and optionally `Usage`. Output is a compressed
//! `.npz` holding `X_train`, `y_train`, `X_val`, `y_val`, `X_test`, `y_test`
//! with `X` shaped `(N, 48, 48, 1)` in `[0, 1]`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::{Array1, Array4, Axis};
use ndarray_npy::NpzWriter;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::image::FACE_SIZE;

const PIXELS_PER_FACE: usize = (FACE_SIZE * FACE_SIZE) as usize;
const SPLIT_SEED: u64 = 42;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column {0:?}")]
    MissingColumn(&'static str),

    #[error("row {row} has unexpected size {size}")]
    UnexpectedSize { row: usize, size: usize },

    #[error("row {row} has invalid pixel value {value:?}")]
    InvalidPixel { row: usize, value: String },

    #[error("row {row} has invalid emotion label {value:?}")]
    InvalidLabel { row: usize, value: String },

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("NPZ write error: {0}")]
    Npz(#[from] ndarray_npy::WriteNpzError),
}

/// How rows were assigned to splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStrategy {
    /// `Training` / `PublicTest` / `PrivateTest` from the `Usage` column.
    Usage,
    /// Seeded shuffle, 80/10/10.
    Random { seed: u64 },
}

#[derive(Debug, Clone)]
pub struct Split {
    pub x: Array4<f32>,
    pub y: Array1<i64>,
}

impl Split {
    fn select(x: &Array4<f32>, y: &Array1<i64>, indices: &[usize]) -> Self {
        Self {
            x: x.select(Axis(0), indices),
            y: y.select(Axis(0), indices),
        }
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct DatasetSplits {
    pub train: Split,
    pub val: Split,
    pub test: Split,
    pub strategy: SplitStrategy,
}

impl DatasetSplits {
    pub fn write_npz(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let mut npz = NpzWriter::new_compressed(File::create(path.as_ref())?);
        for (name, split) in [("train", &self.train), ("val", &self.val), ("test", &self.test)] {
            npz.add_array(format!("X_{}", name), &split.x)?;
            npz.add_array(format!("y_{}", name), &split.y)?;
        }
        npz.finish()?;
        Ok(())
    }
}

struct Columns {
    emotion: usize,
    pixels: usize,
    usage: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Ok(Self {
            emotion: find("emotion").ok_or(DatasetError::MissingColumn("emotion"))?,
            pixels: find("pixels").ok_or(DatasetError::MissingColumn("pixels"))?,
            usage: find("Usage"),
        })
    }
}

fn parse_pixels(row: usize, raw: &str, out: &mut Vec<f32>) -> Result<(), DatasetError> {
    let start = out.len();
    for token in raw.split_whitespace() {
        let value: u8 = token.parse().map_err(|_| DatasetError::InvalidPixel {
            row,
            value: token.to_string(),
        })?;
        out.push(value as f32 / 255.0);
    }

    let size = out.len() - start;
    if size != PIXELS_PER_FACE {
        return Err(DatasetError::UnexpectedSize { row, size });
    }
    Ok(())
}

/// Parse a FER-2013 CSV and split it.
pub fn load_fer2013<R: Read>(reader: R) -> Result<DatasetSplits, DatasetError> {
    let mut csv = csv::Reader::from_reader(reader);
    let columns = Columns::from_headers(csv.headers()?)?;

    let mut pixels = Vec::new();
    let mut labels = Vec::new();
    let mut usages = Vec::new();

    for (row, record) in csv.records().enumerate() {
        let record = record?;
        let raw_label = record.get(columns.emotion).unwrap_or_default().trim();
        let label: i64 = raw_label.parse().map_err(|_| DatasetError::InvalidLabel {
            row,
            value: raw_label.to_string(),
        })?;
        parse_pixels(row, record.get(columns.pixels).unwrap_or_default(), &mut pixels)?;
        labels.push(label);

        if let Some(idx) = columns.usage {
            usages.push(record.get(idx).unwrap_or_default().trim().to_string());
        }
    }

    let n = labels.len();
    let side = FACE_SIZE as usize;
    let x = Array4::from_shape_vec((n, side, side, 1), pixels)?;
    let y = Array1::from_vec(labels);

    let (strategy, [train_idx, val_idx, test_idx]) = match columns.usage {
        Some(_) => (SplitStrategy::Usage, split_by_usage(&usages)),
        None => (
            SplitStrategy::Random { seed: SPLIT_SEED },
            split_random(n, SPLIT_SEED),
        ),
    };

    Ok(DatasetSplits {
        train: Split::select(&x, &y, &train_idx),
        val: Split::select(&x, &y, &val_idx),
        test: Split::select(&x, &y, &test_idx),
        strategy,
    })
}

/// Rows with any other `Usage` value are dropped.
fn split_by_usage(usages: &[String]) -> [Vec<usize>; 3] {
    let indices_of = |usage: &str| -> Vec<usize> {
        usages
            .iter()
            .enumerate()
            .filter(|(_, u)| u.as_str() == usage)
            .map(|(i, _)| i)
            .collect()
    };
    [
        indices_of("Training"),
        indices_of("PublicTest"),
        indices_of("PrivateTest"),
    ]
}

fn split_random(n: usize, seed: u64) -> [Vec<usize>; 3] {
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(&mut StdRng::seed_from_u64(seed));

    let n_train = n * 8 / 10;
    let n_val = n / 10;
    let test = perm.split_off(n_train + n_val);
    let val = perm.split_off(n_train);
    [perm, val, test]
}

/// Read `csv_path`, split, and write the compressed archive to `out_path`.
pub fn prepare_fer2013(
    csv_path: impl AsRef<Path>,
    out_path: impl AsRef<Path>,
) -> Result<DatasetSplits, DatasetError> {
    let start = std::time::Instant::now();
    let splits = load_fer2013(File::open(csv_path.as_ref())?)?;
    splits.write_npz(out_path.as_ref())?;

    tracing::info!(
        out = %out_path.as_ref().display(),
        strategy = ?splits.strategy,
        train = splits.train.len(),
        val = splits.val.len(),
        test = splits.test.len(),
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "FER-2013 dataset prepared"
    );
    Ok(splits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::NpzReader;

    fn pixel_row(value: u8) -> String {
        vec![value.to_string(); PIXELS_PER_FACE].join(" ")
    }

    fn csv_with_usage(rows: &[(i64, u8, &str)]) -> String {
        let mut out = String::from("emotion,pixels,Usage\n");
        for (label, value, usage) in rows {
            out.push_str(&format!("{},{},{}\n", label, pixel_row(*value), usage));
        }
        out
    }

    #[test]
    fn test_split_by_usage_column() {
        let csv = csv_with_usage(&[
            (0, 0, "Training"),
            (3, 255, "PublicTest"),
            (6, 51, "PrivateTest"),
            (2, 10, "Training"),
            (1, 10, "Unused"),
        ]);

        let splits = load_fer2013(csv.as_bytes()).unwrap();
        assert_eq!(splits.strategy, SplitStrategy::Usage);
        assert_eq!(splits.train.x.shape(), &[2, 48, 48, 1]);
        assert_eq!(splits.train.y.to_vec(), vec![0, 2]);
        assert_eq!(splits.val.y.to_vec(), vec![3]);
        assert_eq!(splits.test.y.to_vec(), vec![6]);
        assert_eq!(splits.val.x[[0, 10, 10, 0]], 1.0);
        assert!((splits.test.x[[0, 0, 0, 0]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_random_split_without_usage() {
        let mut csv = String::from("emotion,pixels\n");
        for i in 0..20 {
            csv.push_str(&format!("{},{}\n", i % 7, pixel_row(i as u8)));
        }

        let splits = load_fer2013(csv.as_bytes()).unwrap();
        assert_eq!(splits.strategy, SplitStrategy::Random { seed: 42 });
        assert_eq!(
            (splits.train.len(), splits.val.len(), splits.test.len()),
            (16, 2, 2)
        );

        let again = load_fer2013(csv.as_bytes()).unwrap();
        assert_eq!(splits.train.y, again.train.y);
    }

    #[test]
    fn test_split_random_partitions_all_rows() {
        let [train, val, test] = split_random(11, 7);
        let mut all: Vec<usize> = train.iter().chain(&val).chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..11).collect::<Vec<_>>());
        assert_eq!((train.len(), val.len(), test.len()), (8, 1, 2));
    }

    #[test]
    fn test_unexpected_row_size() {
        let csv = "emotion,pixels\n0,1 2 3\n";
        let err = load_fer2013(csv.as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "row 0 has unexpected size 3");
    }

    #[test]
    fn test_missing_pixels_column() {
        let csv = "emotion,Usage\n0,Training\n";
        assert!(matches!(
            load_fer2013(csv.as_bytes()),
            Err(DatasetError::MissingColumn("pixels"))
        ));
    }

    #[test]
    fn test_invalid_pixel_value() {
        let csv = format!("emotion,pixels\n0,{} 300\n", vec!["1"; PIXELS_PER_FACE - 1].join(" "));
        assert!(matches!(
            load_fer2013(csv.as_bytes()),
            Err(DatasetError::InvalidPixel { row: 0, .. })
        ));
    }

    #[test]
    fn test_prepare_writes_npz() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("fer2013.csv");
        let out_path = dir.path().join("fer2013_data.npz");
        std::fs::write(
            &csv_path,
            csv_with_usage(&[(4, 1, "Training"), (5, 2, "PublicTest"), (6, 3, "PrivateTest")]),
        )
        .unwrap();

        prepare_fer2013(&csv_path, &out_path).unwrap();

        let mut npz = NpzReader::new(File::open(&out_path).unwrap()).unwrap();
        let x_train: Array4<f32> = npz.by_name("X_train").unwrap();
        let y_test: Array1<i64> = npz.by_name("y_test").unwrap();
        assert_eq!(x_train.shape(), &[1, 48, 48, 1]);
        assert_eq!(y_test.to_vec(), vec![6]);
        assert_eq!(npz.len(), 6);
    }
}
