//! Checkout form steps

use std::fmt;

use zeroize::Zeroize;

use crate::validation::{FieldErrors, FieldRules, FieldValues, Schema};

/// Schema for the personal information step.
#[must_use]
pub fn personal_info_schema() -> Schema {
    Schema::new()
        .field(FieldRules::new("first_name").required("First name is required"))
        .field(FieldRules::new("last_name").required("Last name is required"))
        .field(FieldRules::new("email").email("Invalid email format"))
        .field(FieldRules::new("phone").required("Phone number is required"))
        .field(FieldRules::new("street_address").required("Street address is required"))
        .field(FieldRules::new("city").required("City is required"))
        .field(FieldRules::new("country").required("Country is required"))
        .field(FieldRules::new("postcode").required("Postcode/ZIP is required"))
}

/// Schema for the billing information step.
#[must_use]
pub fn billing_info_schema() -> Schema {
    Schema::new()
        .field(FieldRules::new("name_on_card").required("Name on card is required"))
        .field(FieldRules::new("card_number").digits_between(
            16,
            16,
            "Valid card number is required",
        ))
        .field(FieldRules::new("expiry_date").required("Expiry date is required"))
        .field(FieldRules::new("cvv").digits_between(3, 4, "CVV is required"))
}

/// Contact and shipping details captured by checkout step one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalInfo {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// Street address
    pub street_address: String,

    /// City
    pub city: String,

    /// Country
    pub country: String,

    /// Postcode or ZIP
    pub postcode: String,
}

impl PersonalInfo {
    /// Validate raw form values and bind them.
    ///
    /// # Errors
    ///
    /// Returns field-level messages when any constraint fails; nothing is
    /// bound in that case.
    pub fn parse(values: &FieldValues) -> Result<Self, FieldErrors> {
        personal_info_schema().validate(values)?;

        Ok(PersonalInfo {
            first_name: values.get("first_name").to_string(),
            last_name: values.get("last_name").to_string(),
            email: values.get("email").to_string(),
            phone: values.get("phone").to_string(),
            street_address: values.get("street_address").to_string(),
            city: values.get("city").to_string(),
            country: values.get("country").to_string(),
            postcode: values.get("postcode").to_string(),
        })
    }
}

/// Payment details captured by checkout step two.
///
/// Exists only in memory for the duration of one checkout attempt. There is
/// deliberately no serde support, so it cannot reach the durable slot; the
/// card number and CVV are wiped on drop and kept out of `Debug` output.
pub struct BillingInfo {
    /// Cardholder name
    pub name_on_card: String,

    /// Card number (16 digits)
    pub card_number: String,

    /// Expiry date
    pub expiry_date: String,

    /// Card verification value (3-4 digits)
    pub cvv: String,
}

impl BillingInfo {
    /// Validate raw form values and bind them.
    ///
    /// # Errors
    ///
    /// Returns field-level messages when any constraint fails; nothing is
    /// bound in that case.
    pub fn parse(values: &FieldValues) -> Result<Self, FieldErrors> {
        billing_info_schema().validate(values)?;

        Ok(BillingInfo {
            name_on_card: values.get("name_on_card").to_string(),
            card_number: values.get("card_number").to_string(),
            expiry_date: values.get("expiry_date").to_string(),
            cvv: values.get("cvv").to_string(),
        })
    }
}

impl fmt::Debug for BillingInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BillingInfo")
            .field("name_on_card", &self.name_on_card)
            .field("card_number", &"**redacted**")
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"**redacted**")
            .finish()
    }
}

impl Drop for BillingInfo {
    fn drop(&mut self) {
        self.card_number.zeroize();
        self.cvv.zeroize();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn personal_values() -> FieldValues {
        FieldValues::from_pairs(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.com"),
            ("phone", "+44 20 7946 0000"),
            ("street_address", "12 St James's Square"),
            ("city", "London"),
            ("country", "United Kingdom"),
            ("postcode", "SW1Y 4JH"),
        ])
    }

    pub(crate) fn billing_values() -> FieldValues {
        FieldValues::from_pairs(&[
            ("name_on_card", "Ada Lovelace"),
            ("card_number", "4242424242424242"),
            ("expiry_date", "12/27"),
            ("cvv", "123"),
        ])
    }

    #[test]
    fn personal_info_parses_valid_values() {
        let info = PersonalInfo::parse(&personal_values()).expect("expected parse");

        assert_eq!(info.first_name, "Ada");
        assert_eq!(info.postcode, "SW1Y 4JH");
    }

    #[test]
    fn personal_info_rejects_missing_fields() {
        let err = PersonalInfo::parse(&FieldValues::new()).expect_err("expected rejection");

        assert_eq!(err.get("first_name"), Some("First name is required"));
        assert_eq!(err.get("email"), Some("Invalid email format"));
        assert_eq!(err.len(), 8);
    }

    #[test]
    fn billing_info_parses_valid_values() {
        let info = BillingInfo::parse(&billing_values()).expect("expected parse");

        assert_eq!(info.name_on_card, "Ada Lovelace");
        assert_eq!(info.cvv, "123");
    }

    #[test]
    fn billing_info_rejects_short_card_number() {
        let values = billing_values().set("card_number", "4242");

        let err = BillingInfo::parse(&values).expect_err("expected rejection");

        assert_eq!(err.get("card_number"), Some("Valid card number is required"));
    }

    #[test]
    fn billing_info_accepts_four_digit_cvv() {
        let values = billing_values().set("cvv", "1234");

        assert!(BillingInfo::parse(&values).is_ok());
    }

    #[test]
    fn billing_debug_redacts_card_fields() {
        let info = BillingInfo::parse(&billing_values()).expect("expected parse");

        let debug = format!("{info:?}");

        assert!(!debug.contains("4242424242424242"));
        assert!(!debug.contains("123"));
        assert!(debug.contains("**redacted**"));
    }
}
