//! Shape conventions shared by every array-shaped value.
//!
//! All arrays are kept in a normalized form: at least two dimensions, and no
//! trailing singleton dimension past the second. A `2×3×1` array is a `2×3`
//! matrix; a one-dimensional array of length `n` is an `n×1` column.

use crate::{Error, Result};
use ndarray::{ArrayD, Axis, IxDyn};

/// Highest rank an array may reach through concatenation.
pub(crate) const MAX_RANK: usize = 32;

/// Brings an array into normalized form.
pub(crate) fn normalize<A>(mut arr: ArrayD<A>) -> ArrayD<A> {
    while arr.ndim() < 2 {
        let end = arr.ndim();
        arr = arr.insert_axis(Axis(end));
    }
    while arr.ndim() > 2 && arr.shape()[arr.ndim() - 1] == 1 {
        let last = arr.ndim() - 1;
        arr = arr.index_axis_move(Axis(last), 0);
    }
    arr
}

/// Normalizes a bare shape the same way [`normalize`] treats arrays.
pub(crate) fn normalize_shape(shape: &[usize]) -> Vec<usize> {
    let mut dims = shape.to_vec();
    while dims.len() < 2 {
        dims.push(1);
    }
    while dims.len() > 2 && dims[dims.len() - 1] == 1 {
        dims.pop();
    }
    dims
}

/// Builds a normalized array from row-major data.
pub(crate) fn from_row_major<A>(shape: &[usize], data: Vec<A>) -> Result<ArrayD<A>> {
    let arr = ArrayD::from_shape_vec(IxDyn(shape), data)?;
    Ok(normalize(arr))
}

/// Takes the slice at `index` along a zero-based `axis`.
///
/// The axis is removed, so a rank-`d` array yields a rank-`d-1` slice before
/// normalization.
pub(crate) fn slice_axis<A: Clone>(arr: &ArrayD<A>, axis: usize, index: usize) -> ArrayD<A> {
    normalize(arr.index_axis(Axis(axis), index).to_owned())
}

/// Concatenates arrays along a zero-based `axis`.
///
/// Pieces of lower rank are padded with trailing singleton dimensions first,
/// so slices produced by [`slice_axis`] join back into their source array.
pub(crate) fn concat<A: Clone>(axis: usize, parts: &[&ArrayD<A>]) -> Result<ArrayD<A>> {
    if axis >= MAX_RANK {
        return Err(Error::shape_mismatch(format!(
            "dimension {} exceeds the rank limit of {}",
            axis + 1,
            MAX_RANK
        )));
    }
    let rank = parts
        .iter()
        .map(|p| p.ndim())
        .max()
        .unwrap_or(2)
        .max(axis + 1);

    let padded: Vec<ArrayD<A>> = parts
        .iter()
        .map(|p| {
            let mut arr = (*p).clone();
            while arr.ndim() < rank {
                let end = arr.ndim();
                arr = arr.insert_axis(Axis(end));
            }
            arr
        })
        .collect();

    if padded.is_empty() {
        return Err(Error::shape_mismatch("nothing to concatenate"));
    }

    let views: Vec<_> = padded.iter().map(|p| p.view()).collect();
    let joined = ndarray::concatenate(Axis(axis), &views).map_err(|_| {
        Error::shape_mismatch(format!(
            "cannot concatenate shapes {:?} along dimension {}",
            padded.iter().map(|p| p.shape().to_vec()).collect::<Vec<_>>(),
            axis + 1
        ))
    })?;
    Ok(normalize(joined))
}

/// An array with no elements, refusing shapes that hold any.
///
/// Extents are validated by `ndarray`, so a zero axis next to an axis whose
/// length overflows `isize` is an error rather than a panic.
pub(crate) fn empty<A>(shape: &[usize]) -> Result<ArrayD<A>> {
    Ok(ArrayD::from_shape_vec(IxDyn(shape), Vec::new())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_elides_trailing_singletons() {
        let arr = ArrayD::<i32>::zeros(IxDyn(&[2, 3, 1, 1]));
        assert_eq!(normalize(arr).shape(), &[2, 3]);

        let arr = ArrayD::<i32>::zeros(IxDyn(&[2, 1, 4]));
        assert_eq!(normalize(arr).shape(), &[2, 1, 4]);
    }

    #[test]
    fn test_normalize_pads_to_matrix() {
        let arr = ArrayD::<i32>::zeros(IxDyn(&[5]));
        assert_eq!(normalize(arr).shape(), &[5, 1]);

        let arr = ArrayD::<i32>::zeros(IxDyn(&[]));
        assert_eq!(normalize(arr).shape(), &[1, 1]);
    }

    #[test]
    fn test_normalize_shape() {
        assert_eq!(normalize_shape(&[3]), vec![3, 1]);
        assert_eq!(normalize_shape(&[2, 2, 1]), vec![2, 2]);
        assert_eq!(normalize_shape(&[1, 1, 3]), vec![1, 1, 3]);
    }

    #[test]
    fn test_slice_then_concat_restores_array() {
        let data: Vec<i32> = (0..12).collect();
        let arr = from_row_major(&[2, 2, 3], data).unwrap();

        let slices: Vec<_> = (0..3).map(|i| slice_axis(&arr, 2, i)).collect();
        assert!(slices.iter().all(|s| s.shape() == [2, 2]));

        let refs: Vec<_> = slices.iter().collect();
        assert_eq!(concat(2, &refs).unwrap(), arr);
    }

    #[test]
    fn test_concat_rejects_mismatched_extents() {
        let a = from_row_major(&[2, 2], vec![1, 2, 3, 4]).unwrap();
        let b = from_row_major(&[3, 1], vec![1, 2, 3]).unwrap();
        assert!(matches!(concat(1, &[&a, &b]), Err(Error::ShapeMismatch(_))));
    }

    #[test]
    fn test_concat_rows_and_columns() {
        let a = from_row_major(&[1, 2], vec![1, 2]).unwrap();
        let b = from_row_major(&[1, 2], vec![3, 4]).unwrap();
        let rows = concat(0, &[&a, &b]).unwrap();
        assert_eq!(rows.shape(), &[2, 2]);
        let cols = concat(1, &[&a, &b]).unwrap();
        assert_eq!(cols.shape(), &[1, 4]);
    }

    #[test]
    fn test_empty_checks_extents() {
        assert_eq!(empty::<u8>(&[0, 3]).unwrap().shape(), &[0, 3]);
        assert!(empty::<u8>(&[2, 2]).is_err());
        assert!(empty::<u8>(&[0, usize::MAX]).is_err());
    }

    #[test]
    fn test_concat_refuses_ranks_past_the_limit() {
        let a = ArrayD::<i32>::zeros(IxDyn(&[1, 1]));
        assert_eq!(concat(MAX_RANK - 1, &[&a, &a]).unwrap().ndim(), MAX_RANK);
        assert!(matches!(
            concat(MAX_RANK, &[&a, &a]),
            Err(Error::ShapeMismatch(_))
        ));
    }
}
