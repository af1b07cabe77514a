use std::time::Duration;

use crate::submission::{FormId, Notification, Payload};

use super::{AntiAutomationGuard, Check, FieldSource, FieldValue, FormDefinition, RuleSet};

pub const FIRST_NAME: &str = "your-firstname";
pub const LAST_NAME: &str = "your-lastname";
pub const EMAIL: &str = "your-email";
pub const QUANTITY: &str = "quantity";
pub const SHIPMENT: &str = "shipment";
pub const ADDRESS: &str = "your-address";
pub const ZIP: &str = "your-zip";
pub const CITY: &str = "your-city";
pub const NEWSLETTER: &str = "mc4wp-subscribe";
pub const CONSENT: &str = "acceptance-privacy";

const UNIT_TAG: &str = "order-form";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ShipmentMethod {
    #[default]
    #[serde(rename = "Skickat till mig (frakt tillkommer)")]
    Post,
    #[serde(rename = "Mötas upp i Göteborg")]
    PickupGothenburg,
    #[serde(rename = "Mötas upp i Stockholm")]
    PickupStockholm,
}

impl ShipmentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentMethod::Post => "Skickat till mig (frakt tillkommer)",
            ShipmentMethod::PickupGothenburg => "Mötas upp i Göteborg",
            ShipmentMethod::PickupStockholm => "Mötas upp i Stockholm",
        }
    }

    pub fn requires_address(&self) -> bool {
        matches!(self, ShipmentMethod::Post)
    }
}

/// 纸质刊物订购表单
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderForm {
    #[serde(skip)]
    form_id: FormId,
    #[serde(skip)]
    guard: AntiAutomationGuard,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub quantity: String,
    pub shipment: ShipmentMethod,
    pub address: String,
    pub zip: String,
    pub city: String,
    pub newsletter: bool,
    pub consent: bool,
    /// 蜜罐字段，正常用户看不到也不会填写
    #[serde(skip)]
    pub honeypot: String,
}

impl OrderForm {
    pub fn new(form_id: FormId, guard: AntiAutomationGuard) -> Self {
        Self {
            form_id,
            guard,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            quantity: "1".into(),
            shipment: ShipmentMethod::default(),
            address: String::new(),
            zip: String::new(),
            city: String::new(),
            newsletter: false,
            consent: false,
            honeypot: String::new(),
        }
    }
}

impl FieldSource for OrderForm {
    fn value(&self, field: &str) -> FieldValue<'_> {
        match field {
            FIRST_NAME => FieldValue::Text(&self.first_name),
            LAST_NAME => FieldValue::Text(&self.last_name),
            EMAIL => FieldValue::Text(&self.email),
            QUANTITY => FieldValue::Text(&self.quantity),
            SHIPMENT => FieldValue::Text(self.shipment.label()),
            ADDRESS => FieldValue::Text(&self.address),
            ZIP => FieldValue::Text(&self.zip),
            CITY => FieldValue::Text(&self.city),
            NEWSLETTER => FieldValue::Flag(self.newsletter),
            CONSENT => FieldValue::Flag(self.consent),
            _ => FieldValue::Missing,
        }
    }
}

impl FormDefinition for OrderForm {
    fn form_id(&self) -> &FormId {
        &self.form_id
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            FIRST_NAME, LAST_NAME, EMAIL, QUANTITY, SHIPMENT, ADDRESS, ZIP, CITY, NEWSLETTER,
            CONSENT,
        ]
    }

    fn rules(&self) -> RuleSet {
        let rules = RuleSet::new()
            .rule(FIRST_NAME, Check::Required)
            .rule(FIRST_NAME, Check::Name)
            .rule(LAST_NAME, Check::Required)
            .rule(LAST_NAME, Check::Name)
            .rule(EMAIL, Check::Required)
            .rule(EMAIL, Check::EmailPattern)
            .rule(QUANTITY, Check::AtLeast(1));

        let rules = if self.shipment.requires_address() {
            rules
                .rule(ADDRESS, Check::Required)
                .rule(ZIP, Check::Required)
                .rule(CITY, Check::Required)
        } else {
            rules
        };

        rules.rule(CONSENT, Check::Checked)
    }

    fn payload(&self) -> Payload {
        let mut payload = Payload::new()
            .text(FIRST_NAME, self.first_name.trim())
            .text(LAST_NAME, self.last_name.trim())
            .text(EMAIL, self.email.trim())
            .text(QUANTITY, self.quantity.trim())
            .text(SHIPMENT, self.shipment.label());

        // 只有邮寄时才发送地址
        if self.shipment.requires_address() {
            payload = payload
                .text(ADDRESS, self.address.trim())
                .text(ZIP, self.zip.trim())
                .text(CITY, self.city.trim());
        }
        if self.newsletter {
            payload = payload.text(NEWSLETTER, "1");
        }

        payload
            .text(CONSENT, "1")
            .text("_wpcf7_unit_tag", UNIT_TAG)
    }

    fn clear(&mut self) {
        *self = Self::new(self.form_id.clone(), self.guard);
    }

    fn success_notification(&self, _message: &str) -> Notification {
        Notification::welcome(
            "Tack för din beställning!",
            "Vi har mottagit din order. Betalningsinfo kommer via mejl inom kort.",
        )
    }

    fn is_automated(&self, elapsed: Duration) -> bool {
        self.guard.trips(&self.honeypot, elapsed)
    }
}
