//! SvmLight
//!
//! Reader for the sparse `label index:value ...` text format (svmlight /
//! libsvm style). Each line becomes one dense row of a fixed width, any
//! feature a line does not mention defaults to 0. The reader owns the dense
//! row width, every row it hands out has exactly that width.
use crate::data::Matrix;
use crate::errors::CartError;

/// Reader configured with the dense row width.
#[derive(Debug, Clone, Copy)]
pub struct SvmLightReader {
    /// Width every parsed row is padded to.
    pub n_features: usize,
}

/// A parsed dataset, feature values held column-major so a [`Matrix`] can
/// borrow them directly.
#[derive(Debug, Clone)]
pub struct SvmLightData {
    /// Feature values, column-major.
    pub flat_data: Vec<f64>,
    /// One label per row.
    pub y: Vec<usize>,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns, equal to the reader's `n_features`.
    pub cols: usize,
}

impl SvmLightData {
    /// Borrow the parsed values as a matrix.
    pub fn matrix(&self) -> Matrix<f64> {
        Matrix::new(&self.flat_data, self.rows, self.cols)
    }
}

impl SvmLightReader {
    /// Create a reader, the width must be at least 1.
    pub fn new(n_features: usize) -> Result<Self, CartError> {
        if n_features == 0 {
            return Err(CartError::InvalidParameter(
                "n_features".to_string(),
                "a width of at least 1".to_string(),
                "0".to_string(),
            ));
        }
        Ok(SvmLightReader { n_features })
    }

    /// Parse the contents of an svmlight file. Blank lines are skipped,
    /// every other line must start with a non-negative integer label
    /// followed by whitespace separated `index:value` pairs with indices
    /// below the configured width.
    pub fn read_str(&self, contents: &str) -> Result<SvmLightData, CartError> {
        let mut row_major: Vec<f64> = Vec::new();
        let mut y: Vec<usize> = Vec::new();

        for (line_number, line) in contents.lines().enumerate() {
            let line_number = line_number + 1;
            let mut fields = line.split_whitespace();
            let label = match fields.next() {
                None => continue,
                Some(first) => first
                    .parse::<usize>()
                    .map_err(|_| CartError::Parse(line_number, format!("invalid label '{}'", first)))?,
            };
            y.push(label);

            let row_start = row_major.len();
            row_major.resize(row_start + self.n_features, 0.0);
            for pair in fields {
                let (index, value) = pair
                    .split_once(':')
                    .ok_or_else(|| CartError::Parse(line_number, format!("expected index:value, got '{}'", pair)))?;
                let index = index
                    .parse::<usize>()
                    .map_err(|_| CartError::Parse(line_number, format!("invalid feature index '{}'", index)))?;
                let value = value
                    .parse::<f64>()
                    .map_err(|_| CartError::Parse(line_number, format!("invalid feature value '{}'", value)))?;
                if index >= self.n_features {
                    return Err(CartError::Parse(
                        line_number,
                        format!("feature index {} exceeds row width {}", index, self.n_features),
                    ));
                }
                row_major[row_start + index] = value;
            }
        }

        let rows = y.len();
        let cols = self.n_features;
        // Transpose into column-major for the matrix.
        let mut flat_data = vec![0.0; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                flat_data[col * rows + row] = row_major[row * cols + col];
            }
        }
        Ok(SvmLightData {
            flat_data,
            y,
            rows,
            cols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::DecisionTreeClassifier;
    use std::fs;

    #[test]
    fn test_read_basic() {
        let contents = "1 0:2 3:1\n0 1:4.5\n\n1 2:-1\n";
        let reader = SvmLightReader::new(4).unwrap();
        let parsed = reader.read_str(contents).unwrap();
        assert_eq!(parsed.y, vec![1, 0, 1]);
        assert_eq!(parsed.rows, 3);
        assert_eq!(parsed.cols, 4);
        let data = parsed.matrix();
        assert_eq!(data.get_row(0), vec![2.0, 0.0, 0.0, 1.0]);
        assert_eq!(data.get_row(1), vec![0.0, 4.5, 0.0, 0.0]);
        assert_eq!(data.get_row(2), vec![0.0, 0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_read_errors() {
        let reader = SvmLightReader::new(4).unwrap();
        assert!(matches!(reader.read_str("-1 0:2"), Err(CartError::Parse(1, _))));
        assert!(matches!(reader.read_str("1 0:2\n0 nonsense"), Err(CartError::Parse(2, _))));
        assert!(matches!(reader.read_str("1 x:2"), Err(CartError::Parse(1, _))));
        assert!(matches!(reader.read_str("1 0:abc"), Err(CartError::Parse(1, _))));
        assert!(matches!(reader.read_str("1 9:2"), Err(CartError::Parse(1, _))));
    }

    #[test]
    fn test_zero_width() {
        assert!(matches!(
            SvmLightReader::new(0),
            Err(CartError::InvalidParameter(_, _, _))
        ));
    }

    #[test]
    fn test_read_file_and_fit() {
        let contents = fs::read_to_string("resources/a4a_sample.txt").expect("Something went wrong reading the file");
        let reader = SvmLightReader::new(129).unwrap();
        let parsed = reader.read_str(&contents).unwrap();
        assert_eq!(parsed.rows, 12);

        let data = parsed.matrix();
        let mut model = DecisionTreeClassifier::new(2);
        model.fit(&data, &parsed.y).unwrap();
        let preds = model.predict(&data, false).unwrap();
        assert_eq!(preds.len(), parsed.rows);
        assert_eq!(model.num_classes(), Some(2));
    }
}
