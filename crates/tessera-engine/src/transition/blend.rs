use crate::surface::FrameBuffer;

use super::TransitionMap;

/// Weight (`0..=255`) of the new frame for a pixel whose threshold is `threshold`.
///
/// `vagueness` is the width of the soft band trailing the reveal front. At
/// `progress >= 1` every pixel is fully revealed.
pub fn threshold_weight(threshold: u8, progress: f32, vagueness: f32) -> u8 {
    if progress >= 1.0 {
        return 255;
    }

    let t = threshold as f32 / 255.0;
    let alpha = if vagueness <= 0.0 {
        if t < progress { 1.0 } else { 0.0 }
    } else {
        ((progress * (1.0 + vagueness) - t) / vagueness).clamp(0.0, 1.0)
    };
    to_weight(alpha)
}

/// Weight of the new frame for a plain cross-fade.
#[inline]
pub fn linear_weight(progress: f32) -> u8 {
    to_weight(progress.clamp(0.0, 1.0))
}

#[inline]
fn to_weight(alpha: f32) -> u8 {
    (alpha * 255.0).round() as u8
}

/// Blends `from` (the frozen frame) towards `to` (the current frame) into `out`.
///
/// `out` takes the size of `to`; `from` and `map` are sampled with edge clamping
/// when their sizes differ.
pub fn blend_frames(
    from: &FrameBuffer,
    to: &FrameBuffer,
    map: Option<&TransitionMap>,
    progress: f32,
    vagueness: f32,
    out: &mut FrameBuffer,
) {
    out.copy_from(to);

    let weights: [u8; 256] = match map {
        Some(_) => core::array::from_fn(|t| threshold_weight(t as u8, progress, vagueness)),
        None => [linear_weight(progress); 256],
    };

    let (w, h) = (to.width(), to.height());
    let same_size = from.width() == w && from.height() == h;
    let (fw, fh) = (from.width().max(1) - 1, from.height().max(1) - 1);

    for y in 0..h {
        for x in 0..w {
            let i = y as usize * w as usize + x as usize;
            let weight = match map {
                Some(m) => weights[m.threshold(x, y) as usize],
                None => weights[0],
            };
            if weight == 255 {
                continue;
            }

            let old = if same_size {
                from.pixels()[i]
            } else {
                from.get(x.min(fw) as i64, y.min(fh) as i64).unwrap_or_default()
            };
            let px = &mut out.pixels_mut()[i];
            *px = old.mix(*px, weight);
        }
    }
}
