/// Smallest block size produced by the block-size slider.
pub const BLOCK_SIZE_BASE: u32 = 11;
/// Largest position of the block-size slider.
pub const BLOCK_SIZE_STEP_MAX: u8 = 100;
/// Largest position of the constant slider.
pub const CONSTANT_STEP_MAX: u8 = 30;
/// Offset subtracted from the constant slider position.
pub const CONSTANT_OFFSET: i32 = 10;
/// Largest position of the blur amount slider.
pub const BLUR_AMOUNT_MAX: u8 = 100;
/// Largest Gaussian kernel side, for both the blur and the adaptive block.
pub const KERNEL_SIZE_MAX: u32 = 1023;
/// Constants beyond this magnitude cannot change the threshold decision for 8-bit pixels.
pub const CONSTANT_LIMIT: i32 = 255;

/// Options describing how an image is turned into a binary mask before tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreprocessParams {
    /// Invert intensities after the grayscale conversion.
    pub invert: bool,
    /// Smooth the grayscale image before thresholding.
    pub blur: bool,
    /// Gaussian kernel size, coerced to odd (see [`PreprocessParams::blur_kernel`]).
    pub blur_kernel_size: u32,
    /// Side of the adaptive threshold neighbourhood. Must be odd, at least 3 and at most
    /// [`KERNEL_SIZE_MAX`].
    pub block_size: u32,
    /// Subtracted from the local mean to get the per-pixel threshold.
    pub constant: i32,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            invert: false,
            blur: false,
            blur_kernel_size: 1,
            block_size: BLOCK_SIZE_BASE,
            constant: 0,
        }
    }
}

impl PreprocessParams {
    /// Set whether intensities are inverted.
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Enable the Gaussian blur with the given kernel size.
    pub fn with_blur(mut self, kernel_size: u32) -> Self {
        self.blur = true;
        self.blur_kernel_size = kernel_size;
        self
    }

    /// Set the adaptive threshold block size.
    pub fn with_block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the adaptive threshold constant.
    pub fn with_constant(mut self, constant: i32) -> Self {
        self.constant = constant;
        self
    }

    /// Kernel size actually used for blurring: odd, at least 1 and at most [`KERNEL_SIZE_MAX`].
    pub fn blur_kernel(&self) -> u32 {
        odd_kernel_size(self.blur_kernel_size.min(KERNEL_SIZE_MAX))
    }
}

/// Round a kernel size up to the nearest odd value, treating 0 as 1.
pub fn odd_kernel_size(size: u32) -> u32 {
    if size % 2 == 0 { size + 1 } else { size }
}

/// Map a block-size slider position to an adaptive block size (`11 + 2 * step`).
pub fn block_size_from_step(step: u8) -> u32 {
    BLOCK_SIZE_BASE + 2 * u32::from(step.min(BLOCK_SIZE_STEP_MAX))
}

/// Map a constant slider position to the threshold constant (`step - 10`).
pub fn constant_from_step(step: u8) -> i32 {
    i32::from(step.min(CONSTANT_STEP_MAX)) - CONSTANT_OFFSET
}

/// Raw control positions as exposed to a user: checkboxes plus integer sliders.
///
/// Positions outside a slider's range are clamped to the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderSettings {
    pub invert: bool,
    pub blur: bool,
    /// 0-100, fed to the blur as the kernel size.
    pub blur_amount: u8,
    /// 0-100, block size is `11 + 2 * step`.
    pub block_size_step: u8,
    /// 0-30, constant is `step - 10`.
    pub constant_step: u8,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            invert: false,
            blur: false,
            blur_amount: 1,
            block_size_step: 0,
            constant_step: CONSTANT_OFFSET as u8,
        }
    }
}

impl From<&SliderSettings> for PreprocessParams {
    fn from(sliders: &SliderSettings) -> Self {
        Self {
            invert: sliders.invert,
            blur: sliders.blur,
            blur_kernel_size: u32::from(sliders.blur_amount.min(BLUR_AMOUNT_MAX)),
            block_size: block_size_from_step(sliders.block_size_step),
            constant: constant_from_step(sliders.constant_step),
        }
    }
}

/// Options for the CSV spline export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Decimal places written for X, Y and Z.
    pub precision: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { precision: 1 }
    }
}

impl CsvOptions {
    /// Set the number of decimal places.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}
