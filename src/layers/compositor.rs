//! Conversion between stored relative coverage and absolute visibility.
//!
//! Grids store *relative* coverage: the value of layer `m` is its opacity
//! when drawn over the already composited result of every layer below it.
//! Edits need *absolute* visibility instead, the share each layer ends up
//! contributing to the final texel, which always sums to 255. Every mutating
//! operation decodes a texel, edits the visibility, and encodes it back.

use super::alpha_grid::{ALPHA_TEXELS, AlphaGrid};
use super::stack::MAX_LAYERS;

/// Absolute visibility of each layer at one texel, base first.
///
/// Only the first `grids.len() + 1` entries are meaningful.
pub type Visibility = [f32; MAX_LAYERS];

/// Decodes the absolute visibility of every layer at `texel`.
///
/// `grids[m - 1]` belongs to layer `m`; the base layer has no grid.
pub fn decode(grids: &[AlphaGrid], texel: usize) -> Visibility {
    let mut visibility = [0.0; MAX_LAYERS];
    visibility[0] = 255.0;

    for (k, grid) in grids.iter().enumerate() {
        let f = grid.value(texel) as f32;
        visibility[k + 1] = f;
        for v in &mut visibility[..=k] {
            *v = *v * (255.0 - f) / 255.0;
        }
    }

    visibility
}

/// Encodes absolute `visibility` back into relative coverage at `texel`.
///
/// A fully opaque layer above makes everything below it unrecoverable;
/// those layers are written as 0 instead of dividing by zero.
pub fn encode(visibility: &Visibility, grids: &mut [AlphaGrid], texel: usize) {
    let alphas = relative_from(visibility, grids.len());
    for (grid, alpha) in grids.iter_mut().zip(alphas) {
        grid.set_value(texel, quantize(alpha));
    }
}

/// Overwrites every grid with its layer's absolute visibility.
pub fn to_cumulative_form(grids: &mut [AlphaGrid]) {
    for texel in 0..ALPHA_TEXELS {
        let visibility = decode(grids, texel);
        for (k, grid) in grids.iter_mut().enumerate() {
            grid.set_value(texel, quantize(visibility[k + 1]));
        }
    }
}

/// Reinterprets stored values as absolute visibility and re-encodes them.
pub fn to_relative_form(grids: &mut [AlphaGrid]) {
    for texel in 0..ALPHA_TEXELS {
        let mut visibility = [0.0; MAX_LAYERS];
        for (k, grid) in grids.iter().enumerate() {
            visibility[k + 1] = grid.value(texel) as f32;
        }
        encode(&visibility, grids, texel);
    }
}

fn relative_from(visibility: &Visibility, grid_count: usize) -> [f32; MAX_LAYERS - 1] {
    let mut alphas = [0.0f32; MAX_LAYERS - 1];

    // Top-down: each layer is divided out by the already recomputed
    // coverage of every layer above it.
    for m in (0..grid_count).rev() {
        let mut alpha = visibility[m + 1];
        for &above in alphas[m + 1..grid_count].iter().rev() {
            if above == 255.0 {
                alpha = 0.0;
                break;
            }
            alpha = alpha / (255.0 - above) * 255.0;
        }
        alphas[m] = alpha;
    }

    alphas
}

#[inline]
pub(crate) fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_grids(count: usize, max: u32) -> Vec<AlphaGrid> {
        (0..count)
            .map(|k| {
                AlphaGrid::from_fn(|x, y| {
                    ((x as u32 * 37 + y as u32 * 11 + k as u32 * 91) % (max + 1)) as u8
                })
            })
            .collect()
    }

    #[test]
    fn test_decode_base_only() {
        let visibility = decode(&[], 0);
        assert_eq!(visibility[0], 255.0);
    }

    #[test]
    fn test_decode_two_layers() {
        let grids = vec![AlphaGrid::filled(100), AlphaGrid::filled(51)];
        let v = decode(&grids, 7);

        assert_eq!(v[2], 51.0);
        assert!((v[1] - 100.0 * 204.0 / 255.0).abs() < 1e-3);
        assert!((v[0] - 155.0 * 204.0 / 255.0).abs() < 1e-3);
    }

    #[test]
    fn test_visibility_sums_to_255() {
        for count in 0..MAX_LAYERS {
            let grids = pattern_grids(count, 255);
            for texel in 0..ALPHA_TEXELS {
                let v = decode(&grids, texel);
                let sum: f32 = v[..=count].iter().sum();
                assert!((sum - 255.0).abs() < 0.01, "sum {sum} at texel {texel}");
            }
        }
    }

    #[test]
    fn test_round_trip_is_exact_without_saturation() {
        for count in 1..MAX_LAYERS {
            let original = pattern_grids(count, 254);
            let mut grids = original.clone();
            for texel in 0..ALPHA_TEXELS {
                let v = decode(&grids, texel);
                encode(&v, &mut grids, texel);
            }
            assert_eq!(grids, original, "round trip failed for {count} grids");
        }
    }

    #[test]
    fn test_saturated_layer_discards_values_below() {
        let mut grids = vec![AlphaGrid::filled(80), AlphaGrid::filled(255)];
        let v = decode(&grids, 0);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 0.0);

        encode(&v, &mut grids, 0);
        assert_eq!(grids[0].value(0), 0);
        assert_eq!(grids[1].value(0), 255);
        // untouched texels keep their stored value
        assert_eq!(grids[0].value(1), 80);
    }

    #[test]
    fn test_cumulative_and_back() {
        let original = pattern_grids(3, 254);
        let mut grids = original.clone();

        to_cumulative_form(&mut grids);
        let v = decode(&original, 5);
        for k in 0..3 {
            assert_eq!(grids[k].value(5), quantize(v[k + 1]));
        }

        to_relative_form(&mut grids);
        for texel in 0..ALPHA_TEXELS {
            let expected = decode(&original, texel);
            let actual = decode(&grids, texel);
            for k in 0..4 {
                assert!(
                    (expected[k] - actual[k]).abs() <= 2.0,
                    "layer {k} texel {texel}: {} vs {}",
                    expected[k],
                    actual[k]
                );
            }
        }
    }
}
