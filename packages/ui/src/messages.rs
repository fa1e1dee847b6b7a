//! User-facing strings of the login and payment flows and their pages, in
//! Vietnamese and English.

use store::KeyValueTier;

/// Durable-tier key holding the visitor's language choice.
pub const LANGUAGE_KEY: &str = "preferredLanguage";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    Vi,
    En,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Self::En,
            _ => Self::Vi,
        }
    }

    /// Stored preference, Vietnamese when unset.
    pub fn preferred(tier: &impl KeyValueTier) -> Self {
        tier.get(LANGUAGE_KEY)
            .map(|code| Self::from_code(&code))
            .unwrap_or_default()
    }

    pub fn messages(self) -> Messages {
        Messages { lang: self }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Messages {
    lang: Language,
}

impl Messages {
    pub fn language(&self) -> Language {
        self.lang
    }

    fn pick(&self, vi: &'static str, en: &'static str) -> &'static str {
        match self.lang {
            Language::Vi => vi,
            Language::En => en,
        }
    }

    pub fn email_required(&self) -> &'static str {
        self.pick("Vui lòng nhập email", "Please enter your email")
    }

    pub fn email_invalid(&self) -> &'static str {
        self.pick("Email không hợp lệ", "Invalid email address")
    }

    pub fn password_required(&self) -> &'static str {
        self.pick("Vui lòng nhập mật khẩu", "Please enter your password")
    }

    pub fn login_failed(&self) -> &'static str {
        self.pick(
            "Đăng nhập thất bại. Vui lòng thử lại",
            "Login failed. Please try again",
        )
    }

    pub fn sign_in(&self) -> &'static str {
        self.pick("Đăng nhập", "Sign In")
    }

    pub fn signing_in(&self) -> &'static str {
        self.pick("Đang đăng nhập...", "Signing in...")
    }

    pub fn pay_with_vnpay(&self) -> &'static str {
        self.pick("Thanh toán qua VNPay", "Pay with VNPay")
    }

    pub fn vnpay_connecting(&self) -> &'static str {
        self.pick("Đang kết nối VNPay...", "Connecting to VNPay...")
    }

    pub fn vnpay_create_fail(&self) -> &'static str {
        self.pick("Không thể tạo thanh toán VNPay", "Unable to create VNPay payment")
    }

    pub fn error_prefix(&self) -> &'static str {
        self.pick("Lỗi: ", "Error: ")
    }

    pub fn close(&self) -> &'static str {
        self.pick("Đóng", "Close")
    }

    pub fn logout(&self) -> &'static str {
        self.pick("Đăng xuất", "Log out")
    }

    pub fn tagline(&self) -> &'static str {
        self.pick(
            "Đặt vé máy bay nhanh chóng và an toàn.",
            "Book flights quickly and safely.",
        )
    }

    pub fn continue_to_payment(&self) -> &'static str {
        self.pick("Tiếp tục thanh toán", "Continue to payment")
    }

    pub fn login_required(&self) -> &'static str {
        self.pick("Vui lòng đăng nhập để tiếp tục.", "Please sign in to continue.")
    }

    pub fn payment_title(&self) -> &'static str {
        self.pick("Thanh toán", "Payment")
    }

    pub fn flight(&self) -> &'static str {
        self.pick("Chuyến bay", "Flight")
    }

    pub fn booking_code(&self) -> &'static str {
        self.pick("Mã đặt chỗ", "Booking code")
    }

    pub fn total(&self) -> &'static str {
        self.pick("Tổng cộng", "Total")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryTier;

    #[test]
    fn test_preferred_language() {
        let tier = MemoryTier::new();
        assert_eq!(Language::preferred(&tier), Language::Vi);

        tier.set(LANGUAGE_KEY, "en");
        let messages = Language::preferred(&tier).messages();
        assert_eq!(messages.vnpay_connecting(), "Connecting to VNPay...");

        tier.set(LANGUAGE_KEY, "fr");
        assert_eq!(Language::preferred(&tier), Language::Vi);
    }

    #[test]
    fn test_page_copy_follows_language() {
        let vi = Language::Vi.messages();
        assert_eq!(vi.login_required(), "Vui lòng đăng nhập để tiếp tục.");
        assert_eq!(vi.total(), "Tổng cộng");

        let en = Language::En.messages();
        assert_eq!(en.sign_in(), "Sign In");
        assert_eq!(en.continue_to_payment(), "Continue to payment");
        assert_eq!(en.booking_code(), "Booking code");
        assert_eq!(en.close(), "Close");
        assert_eq!(vi.close(), "Đóng");
    }
}
