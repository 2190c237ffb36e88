use image::RgbaImage;
use ndarray::Array2;

const NEIGHBOR_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Clear alpha on every pixel with `alpha < threshold`. Pixels at the threshold survive.
/// Returns the number of pixels whose alpha changed.
pub fn clean_alpha(image: &mut RgbaImage, threshold: u8) -> usize {
    let mut cleared = 0;
    for pixel in image.pixels_mut() {
        if pixel[3] < threshold && pixel[3] != 0 {
            pixel[3] = 0;
            cleared += 1;
        }
    }
    cleared
}

/// Opacity snapshot indexed `[row, col]`; opaque means alpha > 0.
pub fn opacity_mask(image: &RgbaImage) -> Array2<bool> {
    let (cols, rows) = image.dimensions();
    Array2::from_shape_fn((rows as usize, cols as usize), |(y, x)| {
        image.get_pixel(x as u32, y as u32)[3] > 0
    })
}

/// Opaque 4-connected neighbors of `(row, col)`; out-of-bounds counts as transparent.
pub fn count_opaque_neighbors(mask: &Array2<bool>, row: usize, col: usize) -> usize {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|&&(dy, dx)| {
            match (row.checked_add_signed(dy), col.checked_add_signed(dx)) {
                (Some(ny), Some(nx)) => mask.get((ny, nx)).copied().unwrap_or(false),
                _ => false,
            }
        })
        .count()
}

/// Clear opaque pixels with fewer than `min_neighbors` opaque 4-connected neighbors.
///
/// Neighbor counts come from a snapshot taken before any pixel is touched, so the
/// result does not depend on scan order and removals never cascade within a pass.
/// Returns the number of removed pixels.
pub fn remove_orphan_pixels(image: &mut RgbaImage, min_neighbors: usize) -> usize {
    let opaque = opacity_mask(image);
    let mut removed = 0;

    for ((row, col), &is_opaque) in opaque.indexed_iter() {
        if !is_opaque {
            continue;
        }
        if count_opaque_neighbors(&opaque, row, col) < min_neighbors {
            image.get_pixel_mut(col as u32, row as u32)[3] = 0;
            removed += 1;
        }
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn with_opaque(cols: u32, rows: u32, points: &[(u32, u32)]) -> RgbaImage {
        let mut img = RgbaImage::new(cols, rows);
        for &(x, y) in points {
            img.put_pixel(x, y, RED);
        }
        img
    }

    fn opaque_points(img: &RgbaImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| p[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn clean_alpha_threshold_is_exclusive() {
        let mut img = RgbaImage::new(3, 1);
        img.put_pixel(0, 0, Rgba([1, 2, 3, 19]));
        img.put_pixel(1, 0, Rgba([1, 2, 3, 20]));
        img.put_pixel(2, 0, Rgba([1, 2, 3, 21]));

        assert_eq!(clean_alpha(&mut img, 20), 1);
        assert_eq!(img.get_pixel(0, 0).0, [1, 2, 3, 0]);
        assert_eq!(img.get_pixel(1, 0)[3], 20);
        assert_eq!(img.get_pixel(2, 0)[3], 21);
    }

    #[test]
    fn clean_alpha_is_idempotent() {
        let mut once =
            RgbaImage::from_fn(16, 16, |x, y| Rgba([x as u8, y as u8, 7, (x * 16 + y) as u8]));
        clean_alpha(&mut once, 90);
        let mut twice = once.clone();

        assert_eq!(clean_alpha(&mut twice, 90), 0);
        assert_eq!(twice, once);
    }

    #[test]
    fn filled_block_loses_nothing() {
        let points: Vec<(u32, u32)> = (1..4).flat_map(|y| (1..4).map(move |x| (x, y))).collect();
        let mut img = with_opaque(5, 5, &points);

        assert_eq!(remove_orphan_pixels(&mut img, 1), 0);
        assert_eq!(opaque_points(&img).len(), 9);
    }

    #[test]
    fn two_by_two_block_survives() {
        let mut img = with_opaque(2, 2, &[(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(remove_orphan_pixels(&mut img, 1), 0);
    }

    #[test]
    fn isolated_pixel_is_removed() {
        let mut img = with_opaque(3, 3, &[(1, 1)]);
        assert_eq!(remove_orphan_pixels(&mut img, 1), 1);
        assert!(opaque_points(&img).is_empty());
    }

    #[test]
    fn diagonal_pair_is_removed_in_both_orientations() {
        for points in [[(0, 0), (1, 1)], [(1, 0), (0, 1)]] {
            let mut img = with_opaque(2, 2, &points);
            assert_eq!(remove_orphan_pixels(&mut img, 1), 2);
            assert!(opaque_points(&img).is_empty());
        }
    }

    #[test]
    fn removals_do_not_cascade_within_a_pass() {
        // A horizontal line of three: ends have 1 neighbor, middle has 2.
        // With min_neighbors = 2 only the ends go; the middle was counted against
        // the snapshot and stays.
        let mut img = with_opaque(5, 1, &[(1, 0), (2, 0), (3, 0)]);
        assert_eq!(remove_orphan_pixels(&mut img, 2), 2);
        assert_eq!(opaque_points(&img), vec![(2, 0)]);
    }

    #[test]
    fn rgb_is_untouched_when_removed() {
        let mut img = with_opaque(3, 3, &[(1, 1)]);
        remove_orphan_pixels(&mut img, 1);
        assert_eq!(img.get_pixel(1, 1).0, [255, 0, 0, 0]);
    }

    #[test]
    fn zero_min_neighbors_is_a_no_op() {
        let mut img = with_opaque(3, 3, &[(0, 0), (2, 2)]);
        let before = img.clone();
        assert_eq!(remove_orphan_pixels(&mut img, 0), 0);
        assert_eq!(img, before);
    }

    #[test]
    fn edges_count_as_transparent() {
        let mask = opacity_mask(&with_opaque(2, 2, &[(0, 0), (1, 0), (0, 1), (1, 1)]));
        assert_eq!(count_opaque_neighbors(&mask, 0, 0), 2);
        assert_eq!(count_opaque_neighbors(&mask, 1, 1), 2);
    }
}
