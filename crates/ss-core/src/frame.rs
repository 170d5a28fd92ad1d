use crate::error::CoreError;

/// Channel layout of a [`SpriteImage`].
///
/// # Example
/// ```
/// use ss_core::frame::Channels;
/// assert_eq!(Channels::Rgba.count(), 4);
/// assert!(Channels::from_count(2).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl Channels {
    /// Nombre d'octets par pixel.
    #[must_use]
    pub fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Build a layout from a raw channel count.
    ///
    /// # Errors
    /// Returns [`CoreError::UnsupportedChannels`] for anything but 3 or 4.
    pub fn from_count(channels: usize) -> Result<Self, CoreError> {
        match channels {
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            _ => Err(CoreError::UnsupportedChannels { channels }),
        }
    }
}

/// Buffer d'image source, row-major, 3 ou 4 octets par pixel (R, G, B[, A]).
///
/// Jamais modifié en place : l'ajustement luminosité/contraste produit un
/// nouveau buffer.
///
/// # Example
/// ```
/// use ss_core::frame::SpriteImage;
/// let img = SpriteImage::new(2, 1, 4, vec![255, 0, 0, 255, 0, 0, 0, 0]).unwrap();
/// assert_eq!(img.rgb(0, 0), [255, 0, 0]);
/// assert_eq!(img.alpha(1, 0), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: Channels,
}

impl SpriteImage {
    /// Wrap a raw sample buffer.
    ///
    /// # Errors
    /// Returns an error if the channel count is not 3 or 4, if either
    /// dimension is zero, or if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<u8>) -> Result<Self, CoreError> {
        let channels = Channels::from_count(channels)?;
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Build an RGBA image from one `[r, g, b, a]` per pixel, row-major.
    ///
    /// # Errors
    /// Same conditions as [`SpriteImage::new`].
    ///
    /// # Example
    /// ```
    /// use ss_core::frame::SpriteImage;
    /// let img = SpriteImage::from_rgba_pixels(1, 2, &[[255, 85, 85, 255], [0, 0, 0, 0]]).unwrap();
    /// assert_eq!(img.height(), 2);
    /// ```
    pub fn from_rgba_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Result<Self, CoreError> {
        Self::new(width, height, 4, pixels.iter().flatten().copied().collect())
    }

    /// Build an RGB image from one `[r, g, b]` per pixel, row-major.
    ///
    /// # Errors
    /// Same conditions as [`SpriteImage::new`].
    pub fn from_rgb_pixels(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self, CoreError> {
        Self::new(width, height, 3, pixels.iter().flatten().copied().collect())
    }

    /// Image uniforme, pratique pour les tests et benchmarks.
    ///
    /// # Errors
    /// Same conditions as [`SpriteImage::new`].
    pub fn filled(width: u32, height: u32, pixel: &[u8]) -> Result<Self, CoreError> {
        let count = width as usize * height as usize;
        let data = pixel.iter().copied().cycle().take(count * pixel.len()).collect();
        Self::new(width, height, pixel.len(), data)
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout.
    #[must_use]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// True when the buffer carries an alpha channel.
    #[must_use]
    pub fn has_alpha(&self) -> bool {
        self.channels == Channels::Rgba
    }

    /// Raw samples, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Samples of row `y`, `width * channels` long.
    #[inline(always)]
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * self.channels.count();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Accès au pixel (x, y) → [r, g, b].
    #[inline(always)]
    #[must_use]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = self.offset(x, y);
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Alpha of pixel (x, y). Opaque (255) for RGB buffers.
    #[inline(always)]
    #[must_use]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        match self.channels {
            Channels::Rgb => u8::MAX,
            Channels::Rgba => self.data[self.offset(x, y) + 3],
        }
    }

    /// New buffer with `f` applied to every color sample. Alpha is copied as is.
    ///
    /// # Example
    /// ```
    /// use ss_core::frame::SpriteImage;
    /// let img = SpriteImage::filled(1, 1, &[10, 20, 30, 0]).unwrap();
    /// let inverted = img.map_color_samples(|v| 255 - v);
    /// assert_eq!(inverted.data(), &[245, 235, 225, 0]);
    /// ```
    #[must_use]
    pub fn map_color_samples(&self, f: impl Fn(u8) -> u8) -> Self {
        let channels = self.channels.count();
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &v)| if i % channels == 3 { v } else { f(v) })
            .collect();
        Self {
            data,
            width: self.width,
            height: self.height,
            channels: self.channels,
        }
    }

    #[inline(always)]
    fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * self.channels.count()
    }
}
