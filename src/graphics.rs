use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size},
};
use log::warn;

use crate::{config::FieldConfig, error::NoiseError, field::NoiseField};

#[derive(Debug, PartialEq, Eq)]
pub enum DrawError<E> {
    /// The field was built for a different panel than the target.
    SizeMismatch { field: Size, target: Size },
    Target(E),
}

/// Builds a field covering exactly `target`, keeping the rest of `cfg`.
pub fn field_for<T>(target: &T, cfg: FieldConfig) -> Result<NoiseField, NoiseError>
where
    T: OriginDimensions,
{
    let size = target.size();
    let width = i32::try_from(size.width).map_err(|_| NoiseError::InvalidConfig("target too wide"))?;
    let height =
        i32::try_from(size.height).map_err(|_| NoiseError::InvalidConfig("target too tall"))?;
    NoiseField::new(FieldConfig {
        width,
        height,
        ..cfg
    })
}

/// Clears `target` and draws one Atkinson-dithered frame of `field`.
///
/// Stops drawing at the first target error and returns it.
pub fn draw_frame<T>(
    field: &mut NoiseField,
    target: &mut T,
    frame: u32,
) -> Result<(), DrawError<T::Error>>
where
    T: DrawTarget<Color = BinaryColor> + OriginDimensions,
{
    let cfg = field.config();
    let field_size = Size::new(cfg.width as u32, cfg.height as u32);
    let target_size = target.size();
    if field_size != target_size {
        warn!(
            "noise_draw: size mismatch field={}x{} target={}x{}",
            field_size.width, field_size.height, target_size.width, target_size.height
        );
        return Err(DrawError::SizeMismatch {
            field: field_size,
            target: target_size,
        });
    }

    target.clear(BinaryColor::Off).map_err(DrawError::Target)?;

    let mut result = Ok(());
    field.render_bw_atkinson(frame, |x, y| {
        if result.is_ok() {
            result = target.draw_iter(core::iter::once(Pixel(Point::new(x, y), BinaryColor::On)));
        }
    });
    result.map_err(DrawError::Target)
}
