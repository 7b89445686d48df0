use crate::config::BusinessConfig;
use crate::error::{Result, ValidationError};
use crate::models::Property;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// What the visitor is enquiring about
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
pub enum Interest {
    #[default]
    LandPurchase,
    HomeConstruction,
    InvestmentOpportunity,
    DevelopmentProject,
    Consultation,
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Interest::LandPurchase => "Land Purchase",
            Interest::HomeConstruction => "Home Construction",
            Interest::InvestmentOpportunity => "Investment Opportunity",
            Interest::DevelopmentProject => "Development Project",
            Interest::Consultation => "Consultation",
        })
    }
}

/// Contact form; submissions leave as a prefilled messaging link, nothing is stored
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub interest: Interest,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&'static str> = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing).into())
        }
    }

    pub fn message_text(&self) -> String {
        let email = if self.email.trim().is_empty() {
            "Not provided"
        } else {
            self.email.trim()
        };

        format!(
            "New Inquiry from Website:\n\nName: {}\nEmail: {}\nPhone: {}\nInterest: {}\n\nMessage:\n{}",
            self.name.trim(),
            email,
            self.phone.trim(),
            self.interest,
            self.message.trim()
        )
    }

    /// Validate, build the link, then reset the form for the next inquiry
    pub fn submit(&mut self, whatsapp_number: &str) -> Result<String> {
        self.validate()?;
        let link = whatsapp_link(whatsapp_number, &self.message_text());
        info!("Redirecting inquiry from {} to WhatsApp", self.name.trim());
        *self = Self::default();
        Ok(link)
    }
}

/// Prefilled chat link for the given number
pub fn whatsapp_link(number: &str, text: &str) -> String {
    format!("https://wa.me/{}?text={}", number, urlencoding::encode(text))
}

/// Link sent from a listing's "contact" button
pub fn property_inquiry_link(number: &str, property: &Property) -> String {
    let text = format!(
        "Hi, I'm interested in the property: {} - {} ({})",
        property.title, property.location, property.price
    );
    whatsapp_link(number, &text)
}

/// Contact cards shown beside the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub title: &'static str,
    pub details: String,
    pub subtitle: &'static str,
}

pub fn contact_cards(business: &BusinessConfig) -> Vec<ContactCard> {
    vec![
        ContactCard {
            title: "Call Us",
            details: business.phone.clone(),
            subtitle: "Available for inquiries",
        },
        ContactCard {
            title: "Email Us",
            details: business.email.clone(),
            subtitle: "24/7 response guaranteed",
        },
        ContactCard {
            title: "Visit Us",
            details: business.office.clone(),
            subtitle: "Main office location",
        },
        ContactCard {
            title: "Business Hours",
            details: business.hours.clone(),
            subtitle: "Sunday by appointment",
        },
    ]
}
