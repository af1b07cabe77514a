use std::time::Instant;

use tracing::field::{display, Empty};

use crate::{
    domain::{FieldError, ResultStatus, SubmissionResult, SubmissionStatus},
    forms::FormDefinition,
};

use super::{DuplicateClassifier, Notification, PhraseClassifier, SubmissionTransport, TransportError};

/// `submit`的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 请求已发出并得到结论（成功或失败）
    Completed,
    /// 本地校验未通过，没有发出请求
    Blocked,
    /// 被防机器人过滤静默丢弃
    Dropped,
    /// 已有请求在途
    InFlight,
}

/// 当前消息的来源，传输失败时没有可供判定的服务端文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Server,
    Transport,
}

enum Transition {
    Begin,
    Resolved(SubmissionResult),
    Failed(TransportError),
    Reset,
}

/// 单个表单实例的提交状态机
///
/// `idle → sending → success | error`，终态只能通过再次提交或`reset`离开。
/// 每次状态提交之后才重新判定是否为重复登记，并据此决定提示方式。
pub struct FormSession<F, C = PhraseClassifier> {
    form: F,
    classifier: C,
    mounted_at: Instant,
    status: SubmissionStatus,
    message: String,
    field_errors: Vec<FieldError>,
    local_errors: Vec<FieldError>,
    origin: Option<Origin>,
    duplicate: bool,
    notification: Option<Notification>,
}

impl<F: FormDefinition> FormSession<F> {
    pub fn new(form: F) -> Self {
        Self::with_classifier(form, PhraseClassifier)
    }
}

impl<F: FormDefinition, C: DuplicateClassifier> FormSession<F, C> {
    pub fn with_classifier(form: F, classifier: C) -> Self {
        Self {
            form,
            classifier,
            mounted_at: Instant::now(),
            status: SubmissionStatus::Idle,
            message: String::new(),
            field_errors: Vec::new(),
            local_errors: Vec::new(),
            origin: None,
            duplicate: false,
            notification: None,
        }
    }

    /// 表单呈现给用户的时刻，防机器人过滤以此计算填写时长
    pub fn mounted_at(mut self, mounted_at: Instant) -> Self {
        self.mounted_at = mounted_at;
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn local_errors(&self) -> &[FieldError] {
        &self.local_errors
    }

    /// 本地校验错误优先，其次是服务端返回的字段错误
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.local_errors
            .iter()
            .find(|e| e.field == field)
            .or_else(|| {
                self.field_errors
                    .iter()
                    .find(|e| self.form.local_field(&e.field) == Some(field))
            })
            .map(|e| e.message.as_str())
    }

    /// 非重复登记的错误显示在提交按钮旁，不弹窗
    pub fn inline_error(&self) -> Option<&str> {
        (self.status == SubmissionStatus::Error && !self.duplicate && !self.message.is_empty())
            .then_some(self.message.as_str())
    }

    /// 关闭弹窗，其余状态保持不变
    pub fn dismiss(&mut self) {
        self.notification = None;
    }

    pub fn reset(&mut self) {
        self.commit(Transition::Reset);
    }

    #[tracing::instrument(
        name = "表单提交",
        skip_all,
        fields(
            form_id = %self.form.form_id(),
            status = Empty,
            duplicate = Empty,
        )
    )]
    pub async fn submit<T>(&mut self, transport: &T) -> SubmitOutcome
    where
        T: SubmissionTransport + ?Sized,
    {
        if self.status == SubmissionStatus::Sending {
            tracing::warn!("已有请求在途，忽略本次提交.");
            return SubmitOutcome::InFlight;
        }
        if self.form.is_automated(self.mounted_at.elapsed()) {
            tracing::warn!("疑似自动提交，已丢弃.");
            return SubmitOutcome::Dropped;
        }
        let local_errors = self.form.rules().evaluate(&self.form);
        if !local_errors.is_empty() {
            tracing::info!("本地校验未通过: {} 个字段.", local_errors.len());
            self.local_errors = local_errors;
            return SubmitOutcome::Blocked;
        }

        self.commit(Transition::Begin);
        let payload = self.form.payload();
        let transition = match transport.submit(self.form.form_id(), &payload).await {
            Ok(result) => Transition::Resolved(result),
            Err(e) => Transition::Failed(e),
        };
        self.commit(transition);

        tracing::Span::current()
            .record("status", display(self.status))
            .record("duplicate", self.duplicate);
        SubmitOutcome::Completed
    }

    /// 先提交状态变更，再对已提交的状态做判定
    fn commit(&mut self, transition: Transition) {
        match transition {
            Transition::Begin => {
                self.status = SubmissionStatus::Sending;
                self.message.clear();
                self.field_errors.clear();
                self.local_errors.clear();
                self.origin = None;
            }
            Transition::Resolved(result) => {
                self.status = match result.status {
                    ResultStatus::MailSent => SubmissionStatus::Success,
                    ResultStatus::ValidationFailed
                    | ResultStatus::MailFailed
                    | ResultStatus::Spam => SubmissionStatus::Error,
                };
                if result.status == ResultStatus::ValidationFailed {
                    self.field_errors = result.invalid_fields;
                }
                self.message = result.message;
                self.origin = Some(Origin::Server);
            }
            Transition::Failed(e) => {
                tracing::error!(error.cause_chain = ?e, "表单提交失败.");
                self.status = SubmissionStatus::Error;
                self.message = e.user_message();
                self.origin = Some(Origin::Transport);
            }
            Transition::Reset => {
                self.status = SubmissionStatus::Idle;
                self.message.clear();
                self.field_errors.clear();
                self.local_errors.clear();
                self.origin = None;
            }
        }
        self.reconcile();
    }

    fn reconcile(&mut self) {
        self.duplicate = match self.origin {
            Some(Origin::Server) if self.status.is_terminal() => {
                self.classifier.is_duplicate(self.status, &self.message)
            }
            _ => false,
        };

        self.notification = match (self.status, self.duplicate) {
            (SubmissionStatus::Success, false) => {
                let notification = self.form.success_notification(&self.message);
                self.form.clear();
                Some(notification)
            }
            (SubmissionStatus::Success | SubmissionStatus::Error, true) => {
                Some(Notification::already_registered())
            }
            _ => None,
        };
    }
}
