use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::{authentication::Credentials, AsyncSmtpTransport};
use lettre::{AsyncTransport, Tokio1Executor};
use tracing::info;

use super::{ChangeNotice, Notifier};
use crate::config::EmailConfig;

pub struct EmailNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// SMTP over implicit TLS (`smtp_port`, 465 by default) with login credentials.
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .with_context(|| format!("invalid SMTP host {}", config.smtp_host))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        let from = config
            .from
            .parse::<Mailbox>()
            .with_context(|| format!("invalid sender address {:?}", config.from))?;
        let to = config
            .to
            .parse::<Mailbox>()
            .with_context(|| format!("invalid recipient address {:?}", config.to))?;

        Ok(Self { mailer, from, to })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, notice: &ChangeNotice) -> Result<()> {
        let msg = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notice.subject())
            .header(header::ContentType::TEXT_PLAIN)
            .body(notice.body())
            .context("build email")?;

        self.mailer.send(msg).await.context("send email")?;
        info!(site = %notice.site_url, "Email sent");
        Ok(())
    }
}
