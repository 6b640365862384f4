//! 照片收集器 - 业务能力层
//!
//! 只负责按选择顺序缓存照片，不关心流程

use crate::models::SelectedImage;

/// 本次会话中已选择的照片
///
/// 职责：
/// - 只追加，不去重
/// - 保持选择顺序
/// - 不限制数量（单次选择的上限由调用方控制）
#[derive(Debug, Default, Clone)]
pub struct ImageBatch {
    images: Vec<SelectedImage>,
}

impl ImageBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一张照片，返回它的位置
    pub fn append(&mut self, payload: Vec<u8>) -> usize {
        let index = self.images.len();
        self.images.push(SelectedImage::new(index, payload));
        index
    }

    /// 依次追加多张照片
    pub fn extend<I>(&mut self, payloads: I)
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        for payload in payloads {
            self.append(payload);
        }
    }

    /// 返回当前全部照片（不清空）
    pub fn drain(&self) -> &[SelectedImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
