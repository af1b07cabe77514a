mod guard;
mod newsletter;
mod open_call;
mod order;
mod rules;

use std::time::Duration;

pub use guard::AntiAutomationGuard;
pub use newsletter::NewsletterForm;
pub use open_call::OpenCallForm;
pub use order::{OrderForm, ShipmentMethod};
pub use rules::{Check, FieldSource, FieldValue, RuleSet};

use crate::submission::{FormId, Notification, Payload};

/// 一个具体表单：字段、校验规则、提交数据和成功提示
pub trait FormDefinition: FieldSource {
    fn form_id(&self) -> &FormId;

    /// 可以显示错误信息的字段
    fn field_names(&self) -> &'static [&'static str];

    fn rules(&self) -> RuleSet;

    fn payload(&self) -> Payload;

    /// 真正的新提交成功后清空输入
    fn clear(&mut self);

    fn success_notification(&self, message: &str) -> Notification;

    /// 将服务端返回的字段名对应到本地字段，对应不上的错误不显示
    fn local_field(&self, server_field: &str) -> Option<&'static str> {
        self.field_names()
            .iter()
            .copied()
            .find(|name| *name == server_field)
    }

    /// 返回`true`时本次提交被静默丢弃
    fn is_automated(&self, _elapsed: Duration) -> bool {
        false
    }
}
