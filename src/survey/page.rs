/// Commerce admin screens the onboarding survey may appear on. Matched verbatim.
pub const WOOCOMMERCE_PAGES: [&str; 17] = [
    "/wp-admin/admin.php?page=wc-admin",
    "/wp-admin/edit.php?post_type=shop_order",
    "/wp-admin/admin.php?page=wc-admin&path=/customers",
    "/wp-admin/edit.php?post_type=shop_coupon&legacy_coupon_menu=1",
    "/wp-admin/admin.php?page=wc-admin&path=/marketing",
    "/wp-admin/admin.php?page=wc-reports",
    "/wp-admin/admin.php?page=wc-settings",
    "/wp-admin/admin.php?page=wc-status",
    "/wp-admin/admin.php?page=wc-admin&path=/extensions",
    "/wp-admin/edit.php?post_type=product",
    "/wp-admin/post-new.php?post_type=product",
    "/wp-admin/edit.php?post_type=product&page=product-reviews",
    "/wp-admin/edit.php?post_type=product&page=product_attributes",
    "/wp-admin/edit-tags.php?taxonomy=product_cat&post_type=product",
    "/wp-admin/edit-tags.php?taxonomy=product_tag&post_type=product",
    "/wp-admin/admin.php?page=wc-admin&path=/analytics/overview",
    "/wp-admin/admin.php?page=wc-admin",
];

const REST_PREFIX: &str = "/wp-json/";

/// What the host tells us about the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Path plus query string, as received.
    pub uri: String,
    /// Set for asynchronous background requests.
    pub is_ajax: bool,
}

impl RequestContext {
    pub fn page(uri: &str) -> Self {
        Self {
            uri: uri.to_string(),
            is_ajax: false,
        }
    }

    pub fn is_woocommerce_admin_page(&self) -> bool {
        if self.is_ajax || self.uri.contains(REST_PREFIX) {
            return false;
        }
        WOOCOMMERCE_PAGES.contains(&self.uri.as_str())
    }
}
