//! Reading icons drawn from primitives
//!
//! Every icon fits a 16x16 cell. Like text, an icon is positioned by its
//! baseline: the cell's bottom row sits on `baseline.y`.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Ellipse, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle,
};

use cropcast_core::traits::Icon;

/// Icon cell edge (px)
pub const ICON_SIZE: u32 = 16;

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

fn fill() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_fill(BinaryColor::On)
}

/// Draw `icon` with the bottom-left of its cell at `baseline`
pub fn draw<T>(target: &mut T, icon: Icon, baseline: Point) -> Result<(), T::Error>
where
    T: DrawTarget<Color = BinaryColor>,
{
    let origin = baseline - Point::new(0, ICON_SIZE as i32 - 1);
    let at = |x: i32, y: i32| origin + Point::new(x, y);

    match icon {
        Icon::Thermometer => {
            RoundedRectangle::with_equal_corners(
                Rectangle::new(at(6, 0), Size::new(5, 11)),
                Size::new(4, 4),
            )
            .into_styled(stroke())
            .draw(target)?;
            Line::new(at(8, 4), at(8, 11))
                .into_styled(stroke())
                .draw(target)?;
            Circle::new(at(5, 10), 6).into_styled(fill()).draw(target)
        }
        Icon::Droplet => {
            Triangle::new(at(8, 1), at(3, 9), at(13, 9))
                .into_styled(fill())
                .draw(target)?;
            Circle::new(at(3, 5), 11).into_styled(fill()).draw(target)
        }
        Icon::Leaf => {
            Ellipse::new(at(2, 2), Size::new(14, 9))
                .into_styled(stroke())
                .draw(target)?;
            // Vein running into the stem
            Line::new(at(0, 15), at(13, 4))
                .into_styled(stroke())
                .draw(target)
        }
        Icon::Cloud => {
            Circle::new(at(1, 7), 7).into_styled(fill()).draw(target)?;
            Circle::new(at(5, 3), 8).into_styled(fill()).draw(target)?;
            Circle::new(at(9, 7), 6).into_styled(fill()).draw(target)?;
            Rectangle::new(at(4, 10), Size::new(9, 4))
                .into_styled(fill())
                .draw(target)
        }
        Icon::Lightbulb => {
            Circle::new(at(3, 0), 10).into_styled(stroke()).draw(target)?;
            Rectangle::new(at(6, 10), Size::new(4, 3))
                .into_styled(stroke())
                .draw(target)?;
            Line::new(at(6, 14), at(9, 14))
                .into_styled(stroke())
                .draw(target)
        }
        Icon::List => {
            for row in [2, 7, 12] {
                Rectangle::new(at(1, row - 1), Size::new(2, 2))
                    .into_styled(fill())
                    .draw(target)?;
                Line::new(at(5, row), at(14, row))
                    .into_styled(stroke())
                    .draw(target)?;
            }
            Ok(())
        }
    }
}
