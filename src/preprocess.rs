use fast_image_resize::{FilterType, ResizeAlg, ResizeOptions, Resizer};
use image::{ColorType, DynamicImage, GenericImageView};
use ndarray::Array4;

use crate::error::ClassifierError;

/// Side length of the square network input.
pub const INPUT_SIZE: u32 = 224;
/// ImageNet statistics the backbone was trained with.
pub const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
pub const STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Turns an arbitrary image into a `[1, 3, 224, 224]` normalized tensor.
#[derive(Debug)]
pub struct Preprocessor {
    resize_options: ResizeOptions,
    // x * alpha + beta == (x / 255 - mean) / std
    alpha: [f32; 3],
    beta: [f32; 3],
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor {
    pub fn new() -> Self {
        Self {
            resize_options: ResizeOptions {
                algorithm: ResizeAlg::Convolution(FilterType::CatmullRom),
                mul_div_alpha: false,
                ..Default::default()
            },
            alpha: std::array::from_fn(|c| 1. / (255. * STD[c])),
            beta: std::array::from_fn(|c| -MEAN[c] / STD[c]),
        }
    }

    pub fn preprocess(&self, image: &DynamicImage) -> Result<Array4<f32>, ClassifierError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ClassifierError::EmptyImage { width, height });
        }

        // 统一为 RGB8，忽略 alpha 通道；已是 RGB8 时直接借用，避免复制原图
        let converted;
        let src = match image {
            DynamicImage::ImageRgb8(_) => image,
            _ => {
                converted = DynamicImage::ImageRgb8(image.to_rgb8());
                &converted
            }
        };
        let mut dst = DynamicImage::new(INPUT_SIZE, INPUT_SIZE, ColorType::Rgb8);
        // Resizer 只保存临时缓冲区，每次调用新建即可，无需加锁
        Resizer::new().resize(src, &mut dst, &self.resize_options)?;

        let size = INPUT_SIZE as usize;
        let mut input = Array4::zeros((1, 3, size, size));
        for (x, y, pixel) in dst.into_rgb8().enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for (c, value) in pixel.0.into_iter().enumerate() {
                input[[0, c, y, x]] = (value as f32) * self.alpha[c] + self.beta[c];
            }
        }
        Ok(input)
    }
}
