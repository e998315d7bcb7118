//! Bitmap loading onto the panel

use alloc::vec;

use tcon_core::bitmap::BitmapHeader;
use tcon_core::Rectangle;
use tcon_hal::Transport;
use tcon_protocol::ImageInfo;

use super::{Error, It8951};

impl<T: Transport> It8951<'_, T> {
    /// Load a 4 bpp BMP image held in memory with its top-left corner at
    /// (`x`, `y`)
    ///
    /// The image is written to the frame buffer only; refresh it with
    /// [`display_area`](Self::display_area).
    pub fn load_bitmap_bytes(
        &mut self,
        data: &[u8],
        x: u16,
        y: u16,
    ) -> Result<Rectangle, Error<T::Error>> {
        let header = BitmapHeader::parse(data)
            .and_then(|header| header.pixel_array(data).map(|_| header))
            .map_err(|e| {
                warn!("bitmap rejected");
                Error::<T::Error>::Bitmap(e)
            })?;
        let rect = Rectangle::new(x, y, header.width, header.height);
        debug!("bitmap {}x{} at {},{}", header.width, header.height, x, y);
        self.require_ready()?;
        self.check_rect(&rect)?;

        let mut pixels = vec![0u8; header.pixel_count()];
        header.unpack(data, &mut pixels)?;
        self.write_pixels(&ImageInfo::default(), &rect, &pixels)?;
        Ok(rect)
    }

    /// Load a 4 bpp BMP file with its top-left corner at (`x`, `y`)
    #[cfg(feature = "std")]
    pub fn load_bmp<P: AsRef<std::path::Path>>(
        &mut self,
        path: P,
        x: u16,
        y: u16,
    ) -> Result<Rectangle, Error<T::Error>> {
        let data = std::fs::read(path.as_ref()).map_err(|_| {
            warn!("failed to open bitmap file");
            Error::<T::Error>::FileOpen
        })?;
        self.load_bitmap_bytes(&data, x, y)
    }
}
