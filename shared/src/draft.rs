//! 商品表单草稿与客户端校验
//!
//! 表单字段以原始字符串保存，提交前统一校验并转换为请求对象。
//! 校验失败时不会发出任何网络请求。

use crate::{CreateProductRequest, UpdateProductRequest};

/// 新建商品表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category_id: String,
}

/// 各字段的校验错误信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftErrors {
    pub name: Option<&'static str>,
    pub price: Option<&'static str>,
    pub image_url: Option<&'static str>,
    pub category_id: Option<&'static str>,
}

impl DraftErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.category_id.is_none()
    }
}

/// 解析价格：需为有限数字且大于 0
pub fn parse_price(raw: &str) -> Result<f64, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Price must be a valid number");
    }
    match raw.parse::<f64>() {
        Ok(v) if !v.is_finite() => Err("Price must be a valid number"),
        Ok(v) if v <= 0.0 => Err("Price must be greater than 0"),
        Ok(v) => Ok(v),
        Err(_) => Err("Price must be a valid number"),
    }
}

impl ProductDraft {
    /// 校验所有字段；全部通过时返回创建请求
    pub fn validate(&self) -> Result<CreateProductRequest, DraftErrors> {
        let mut errors = DraftErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Name is required");
        }
        let price = match parse_price(&self.price) {
            Ok(v) => v,
            Err(msg) => {
                errors.price = Some(msg);
                0.0
            }
        };
        if self.category_id.is_empty() {
            errors.category_id = Some("Please select a category");
        }
        if self.image_url.trim().is_empty() {
            errors.image_url = Some("Image URL is required");
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CreateProductRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            price,
            images: vec![self.image_url.trim().to_string()],
            category_id: self.category_id.clone(),
        })
    }
}

/// 编辑表单：名称与描述均为必填
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditDraft {
    pub name: String,
    pub description: String,
}

impl EditDraft {
    pub fn validate(&self) -> Result<UpdateProductRequest, &'static str> {
        if self.name.trim().is_empty() {
            return Err("Product name is required");
        }
        if self.description.trim().is_empty() {
            return Err("Description is required");
        }
        Ok(UpdateProductRequest {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: "Lamp".into(),
            description: "Warm light".into(),
            price: "19.99".into(),
            image_url: " https://img.example/lamp.jpg ".into(),
            category_id: "c1".into(),
        }
    }

    #[test]
    fn test_valid_draft_builds_request() {
        let req = valid_draft().validate().unwrap();
        assert_eq!(req.price, 19.99);
        assert_eq!(req.images, vec!["https://img.example/lamp.jpg".to_string()]);
        assert_eq!(req.category_id, "c1");
    }

    #[test]
    fn test_zero_price_is_rejected() {
        let draft = ProductDraft {
            price: "0".into(),
            ..valid_draft()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.price, Some("Price must be greater than 0"));
        assert!(errors.name.is_none());
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        for raw in ["abc", "", "  ", "NaN", "inf", "12abc"] {
            let draft = ProductDraft {
                price: raw.into(),
                ..valid_draft()
            };
            assert_eq!(
                draft.validate().unwrap_err().price,
                Some("Price must be a valid number"),
                "price {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_all_missing_fields_reported() {
        let errors = ProductDraft::default().validate().unwrap_err();
        assert_eq!(errors.name, Some("Name is required"));
        assert_eq!(errors.price, Some("Price must be a valid number"));
        assert_eq!(errors.category_id, Some("Please select a category"));
        assert_eq!(errors.image_url, Some("Image URL is required"));
    }

    #[test]
    fn test_negative_price() {
        assert_eq!(parse_price("-3"), Err("Price must be greater than 0"));
        assert_eq!(parse_price(" 4.5 "), Ok(4.5));
    }

    #[test]
    fn test_edit_draft_requires_both_fields() {
        let draft = EditDraft {
            name: "Lamp".into(),
            description: " ".into(),
        };
        assert_eq!(draft.validate(), Err("Description is required"));

        let ok = EditDraft {
            name: "Lamp".into(),
            description: "Bright".into(),
        };
        assert_eq!(ok.validate().unwrap().name, "Lamp");
    }
}
