//! Shape arithmetic for the structural builders.

use crate::error::TensorError;

/// Shape of `shapes[0]` concatenated with the rest along `axis`.
///
/// # Errors
///
/// - `TensorError::InvalidAxis` if `axis` is out of range for `shapes[0]`.
/// - `TensorError::ShapeMismatch` if any shape differs in rank or in an
///   extent other than `axis`.
///
/// # Examples
///
/// ```
/// use ndstrided::concat_shape;
///
/// assert_eq!(concat_shape(0, &[&[2, 3], &[4, 3]]).unwrap(), vec![6, 3]);
/// assert!(concat_shape(0, &[&[2, 3], &[2, 4]]).is_err());
/// ```
pub fn concat_shape(axis: usize, shapes: &[&[usize]]) -> Result<Vec<usize>, TensorError> {
    let Some((first, rest)) = shapes.split_first() else {
        return Err(TensorError::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    };
    if axis >= first.len() {
        return Err(TensorError::InvalidAxis {
            axis,
            ndim: first.len(),
        });
    }

    let mut new_shape = first.to_vec();
    for shape in rest {
        let agrees = shape.len() == first.len()
            && shape
                .iter()
                .zip(first.iter())
                .enumerate()
                .all(|(i, (a, b))| i == axis || a == b);
        if !agrees {
            return Err(TensorError::ShapeMismatch {
                expected: first.to_vec(),
                actual: shape.to_vec(),
            });
        }
        new_shape[axis] += shape[axis];
    }
    Ok(new_shape)
}

/// Shape of `count` arrays of `shape` stacked along a new axis at `axis`.
///
/// # Errors
///
/// Returns `TensorError::InvalidAxis` if `axis > shape.len()`.
pub fn stack_shape(
    axis: usize,
    shape: &[usize],
    count: usize,
) -> Result<Vec<usize>, TensorError> {
    if axis > shape.len() {
        return Err(TensorError::InvalidAxis {
            axis,
            ndim: shape.len() + 1,
        });
    }
    let mut new_shape = Vec::with_capacity(shape.len() + 1);
    new_shape.extend_from_slice(&shape[..axis]);
    new_shape.push(count);
    new_shape.extend_from_slice(&shape[axis..]);
    Ok(new_shape)
}

/// Shape of `shape` repeated along `axis`.
///
/// `axis = None` repeats the flattened array. `repeats` is broadcast the way
/// a scalar broadcasts to a vector: a single count applies to every position,
/// otherwise there must be one count per position.
///
/// Returns the new shape, the per-position counts, and the number of
/// positions along the repeated axis.
///
/// # Errors
///
/// - `TensorError::InvalidAxis` if `axis` is out of range.
/// - `TensorError::ShapeMismatch` if `repeats` cannot be broadcast.
///
/// # Examples
///
/// ```
/// use ndstrided::repeat_shape;
///
/// let (shape, repeats, len) = repeat_shape(&[2, 3], Some(1), &[2]).unwrap();
/// assert_eq!(shape, vec![2, 6]);
/// assert_eq!(repeats, vec![2, 2, 2]);
/// assert_eq!(len, 3);
///
/// let (shape, _, _) = repeat_shape(&[2, 3], None, &[2]).unwrap();
/// assert_eq!(shape, vec![12]);
/// ```
pub fn repeat_shape(
    shape: &[usize],
    axis: Option<usize>,
    repeats: &[usize],
) -> Result<(Vec<usize>, Vec<usize>, usize), TensorError> {
    let (mut new_shape, axis, size) = match axis {
        None => {
            let size = shape.iter().product();
            (vec![size], 0, size)
        }
        // A scalar repeats into a vector, or a row for axis 1.
        Some(0) if shape.is_empty() => (vec![1], 0, 1),
        Some(1) if shape.is_empty() => (vec![1, 1], 1, 1),
        // A 1-D array repeated along axis 1 becomes a column.
        Some(1) if shape.len() == 1 => (vec![shape[0], 1], 1, 1),
        Some(axis) if axis < shape.len() => (shape.to_vec(), axis, shape[axis]),
        Some(axis) => {
            return Err(TensorError::InvalidAxis {
                axis,
                ndim: shape.len(),
            });
        }
    };

    let repeats = match repeats {
        [single] => vec![*single; size],
        _ if repeats.len() == size => repeats.to_vec(),
        _ => {
            return Err(TensorError::ShapeMismatch {
                expected: vec![size],
                actual: vec![repeats.len()],
            });
        }
    };

    new_shape[axis] = repeats.iter().sum();
    Ok((new_shape, repeats, size))
}
