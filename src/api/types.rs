use serde::{Deserialize, Serialize};

/// Coupon page links for a restaurant. `mobile` is empty when the
/// directory only publishes a desktop page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct CouponUrls {
    #[serde(default)]
    pub pc: String,
    #[serde(rename = "sp", default)]
    pub mobile: String,
}

impl CouponUrls {
    /// Mobile page when present, desktop page otherwise.
    pub fn resolve(&self) -> &str {
        if self.mobile.is_empty() {
            &self.pc
        } else {
            &self.mobile
        }
    }
}

/// A restaurant record as returned by the directory. Immutable once received.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(rename = "logo_image", default)]
    pub logo_image_url: String,
    #[serde(default)]
    pub coupon_urls: CouponUrls,
}

impl Restaurant {
    pub fn coupon_url(&self) -> &str {
        self.coupon_urls.resolve()
    }
}

// ============================================================================
// Wire envelope
// ============================================================================

/// Top-level response body: `{"results": {...}}`.
#[derive(Deserialize, Debug)]
pub struct SearchEnvelope {
    pub results: SearchResults,
}

/// The service reports failures inside a 200 response as `results.error`,
/// so both fields are optional and checked by the client.
#[derive(Deserialize, Debug)]
pub struct SearchResults {
    pub shop: Option<Vec<Restaurant>>,
    pub error: Option<Vec<ApiErrorDetail>>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: serde_json::Value,
    #[serde(default)]
    pub message: String,
}
