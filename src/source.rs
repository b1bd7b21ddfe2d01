use std::borrow::Cow;
use std::ops::Deref;

use image::{ImageBuffer, Rgba};

use crate::error::{Result, invalid};

/// Anything that can hand out row-major RGBA8 pixels.
///
/// Rows are `width * 4` bytes long. `read_all` defaults to concatenating
/// rows; sources that already hold a contiguous buffer should override it.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    fn read_row(&self, y: u32) -> Result<Cow<'_, [u8]>>;

    fn read_all(&self) -> Result<Cow<'_, [u8]>> {
        let mut buf = Vec::with_capacity(self.width() as usize * self.height() as usize * 4);
        for y in 0..self.height() {
            buf.extend_from_slice(&self.read_row(y)?);
        }
        Ok(Cow::Owned(buf))
    }
}

impl<C> PixelSource for ImageBuffer<Rgba<u8>, C>
where
    C: Deref<Target = [u8]>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn read_row(&self, y: u32) -> Result<Cow<'_, [u8]>> {
        if y >= ImageBuffer::height(self) {
            return Err(invalid(format!("row {y} out of range (height {})", ImageBuffer::height(self))));
        }
        let stride = ImageBuffer::width(self) as usize * 4;
        let start = y as usize * stride;
        let raw: &[u8] = self.as_raw();
        Ok(Cow::Borrowed(&raw[start..start + stride]))
    }

    fn read_all(&self) -> Result<Cow<'_, [u8]>> {
        let raw: &[u8] = self.as_raw();
        let len = ImageBuffer::width(self) as usize * ImageBuffer::height(self) as usize * 4;
        Ok(Cow::Borrowed(&raw[..len]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    /// Source that only implements row access, to exercise the default `read_all`.
    struct Rows(RgbaImage);

    impl PixelSource for Rows {
        fn width(&self) -> u32 {
            self.0.width()
        }
        fn height(&self) -> u32 {
            self.0.height()
        }
        fn read_row(&self, y: u32) -> Result<Cow<'_, [u8]>> {
            PixelSource::read_row(&self.0, y)
        }
    }

    #[test]
    fn rows_are_width_times_four_bytes() {
        let img = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let row = PixelSource::read_row(&img, 1).unwrap();
        assert_eq!(row.len(), 12);
        assert_eq!(&row[4..8], &[1, 1, 0, 255]);
        assert!(PixelSource::read_row(&img, 2).is_err());
    }

    #[test]
    fn default_read_all_matches_raw_buffer() {
        let img = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let expected = img.as_raw().clone();
        let rows = Rows(img);
        assert_eq!(rows.read_all().unwrap().as_ref(), expected.as_slice());
    }

    #[test]
    fn borrowed_buffers_are_sources() {
        let data = [9u8; 2 * 2 * 4];
        let view: ImageBuffer<Rgba<u8>, &[u8]> = ImageBuffer::from_raw(2, 2, &data[..]).unwrap();
        assert_eq!(PixelSource::width(&view), 2);
        assert_eq!(view.read_all().unwrap().len(), 16);
    }
}
