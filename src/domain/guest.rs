use crate::domain::BookingError;
use serde::{Deserialize, Serialize};

/// Contact details and requests collected on the guest form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestInfo {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub province: String,
    pub number_of_guests: u32,
    pub extra_bed: u32,
    pub check_in_time: String,
    pub special_requests: String,
}

impl Default for GuestInfo {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            province: String::new(),
            number_of_guests: 1,
            extra_bed: 0,
            check_in_time: String::new(),
            special_requests: String::new(),
        }
    }
}

impl GuestInfo {
    pub fn new(full_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        province: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.city = city.into();
        self.province = province.into();
        self
    }

    /// Labels of the required fields that are still blank, in form order.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let text_fields = [
            ("full name", &self.full_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("province", &self.province),
        ];

        let mut missing: Vec<&'static str> = text_fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(label, _)| label)
            .collect();
        if self.number_of_guests == 0 {
            missing.push("number of guests");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BookingError::MissingGuestFields { missing })
        }
    }

    /// Address followed by city and province, skipping empty parts.
    pub fn location_line(&self) -> String {
        let parts: Vec<&str> = [&self.address, &self.city, &self.province]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            "-".to_string()
        } else {
            parts.join(", ")
        }
    }

    pub fn extra_bed_label(&self) -> String {
        match self.extra_bed {
            0 => "Tidak perlu".to_string(),
            beds => format!("{beds} bed"),
        }
    }
}
