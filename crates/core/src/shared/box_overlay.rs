use image::{ImageBuffer, Luma, Rgb};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::shared::constants::{BOX_COLOR, BOX_THICKNESS};
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// Draws a red outline around each region, in place.
///
/// Regions are expected in full-frame coordinates; anything outside the
/// frame is clipped. Gray frames get the outline in white.
pub fn draw_boxes(frame: &mut Frame, regions: &[Region]) {
    let (width, height) = (frame.width(), frame.height());
    let rects: Vec<Rect> = regions
        .iter()
        .filter(|r| r.clamped(width, height).is_some())
        .flat_map(|r| outline_rects(*r))
        .collect();
    if rects.is_empty() {
        return;
    }

    match frame.channels() {
        3 => {
            let Some(mut img) =
                ImageBuffer::<Rgb<u8>, &mut [u8]>::from_raw(width, height, frame.data_mut())
            else {
                log::warn!("Frame buffer too small for {width}x{height}, skipping overlay");
                return;
            };
            for rect in rects {
                draw_hollow_rect_mut(&mut img, rect, Rgb(BOX_COLOR));
            }
        }
        1 => {
            let Some(mut img) =
                ImageBuffer::<Luma<u8>, &mut [u8]>::from_raw(width, height, frame.data_mut())
            else {
                log::warn!("Frame buffer too small for {width}x{height}, skipping overlay");
                return;
            };
            for rect in rects {
                draw_hollow_rect_mut(&mut img, rect, Luma([u8::MAX]));
            }
        }
        n => log::warn!("Cannot draw boxes on a {n}-channel frame"),
    }
}

/// One-pixel rectangles nested inward to build a `BOX_THICKNESS` outline.
fn outline_rects(region: Region) -> impl Iterator<Item = Rect> {
    (0..BOX_THICKNESS as i32).filter_map(move |inset| {
        let w = region.width - 2 * inset;
        let h = region.height - 2 * inset;
        (w > 0 && h > 0)
            .then(|| Rect::at(region.x + inset, region.y + inset).of_size(w as u32, h as u32))
    })
}
