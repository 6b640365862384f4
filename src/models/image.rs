//! 用户选择的照片
//!
//! 照片以原始字节保存，只在提交时做一次格式检查

use crate::error::ImageError;

/// 可识别的图片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Heif,
}

impl ImageFormat {
    /// 根据文件头判断图片格式
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

        if bytes.starts_with(PNG_MAGIC) {
            return Some(ImageFormat::Png);
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        // ISO BMFF: [size][ftyp][brand]
        if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
            let brand = &bytes[8..12];
            if [b"heic", b"heix", b"heif", b"mif1", b"msf1"]
                .iter()
                .any(|b| brand == *b)
            {
                return Some(ImageFormat::Heif);
            }
        }
        None
    }
}

/// 一张待提交的照片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// 在本次会话照片列表中的位置（从0开始）
    index: usize,
    bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(index: usize, bytes: Vec<u8>) -> Self {
        Self { index, bytes }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 上传时使用的文件名，按位置编号
    pub fn file_name(&self) -> String {
        format!("{}.png", self.index)
    }

    /// 检查照片能否作为上传内容
    ///
    /// # 返回
    /// 返回识别出的格式；空数据或未知格式返回错误
    pub fn encode(&self) -> Result<ImageFormat, ImageError> {
        if self.bytes.is_empty() {
            return Err(ImageError::EmptyPayload { index: self.index });
        }
        ImageFormat::sniff(&self.bytes).ok_or(ImageError::UnsupportedFormat { index: self.index })
    }
}
