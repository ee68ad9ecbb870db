use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;
use thiserror::Error;

/// An email template. Subject and bodies may contain `{{token}}`
/// placeholders resolved at send time.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplate {
    pub id: ID,
    pub name: String,
    pub subject: String,
    pub body_text: String,
    pub body_html: String,
}

impl EmailTemplate {
    pub fn new(name: String, subject: String, body_text: String, body_html: String) -> Self {
        Self {
            id: Default::default(),
            name,
            subject,
            body_text,
            body_html,
        }
    }
}

impl Entity for EmailTemplate {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// Values available to template placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub company_name: String,
    pub deadline: NaiveDate,
    /// Filing display name, or the schedule name for custom reminders.
    pub filing_type: String,
    pub accountant_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Unknown template token: {0}")]
    UnknownToken(String),
    #[error("Template has unbalanced braces")]
    UnbalancedBraces,
}

/// Resolves every placeholder in the template against the context. Fails on
/// the first unknown token or a `{{` without its closing `}}`, so a broken
/// template is reported rather than sent half substituted.
pub fn render(
    template: &EmailTemplate,
    context: &RenderContext,
) -> Result<RenderedEmail, RenderError> {
    Ok(RenderedEmail {
        subject: substitute(&template.subject, context)?,
        text: substitute(&template.body_text, context)?,
        html: substitute(&template.body_html, context)?,
    })
}

fn substitute(input: &str, context: &RenderContext) -> Result<String, RenderError> {
    let mut resolved = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        resolved.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let end = after_open
            .find("}}")
            .ok_or(RenderError::UnbalancedBraces)?;
        let token = after_open[..end].trim();
        let value = match token {
            "company_name" => context.company_name.clone(),
            "deadline" => context.deadline.format("%-d %B %Y").to_string(),
            "filing_type" => context.filing_type.clone(),
            "accountant_name" => context.accountant_name.clone(),
            _ => return Err(RenderError::UnknownToken(token.to_string())),
        };
        resolved.push_str(&value);
        rest = &after_open[end + 2..];
    }
    resolved.push_str(rest);
    Ok(resolved)
}

#[cfg(test)]
mod test {
    use super::*;

    fn context() -> RenderContext {
        RenderContext {
            company_name: "Bluebird Joinery Ltd".into(),
            deadline: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            filing_type: "Corporation Tax Payment".into(),
            accountant_name: "Harris & Co".into(),
        }
    }

    fn template(subject: &str, body: &str) -> EmailTemplate {
        EmailTemplate::new(
            "Reminder".into(),
            subject.into(),
            body.into(),
            format!("<p>{}</p>", body),
        )
    }

    #[test]
    fn it_substitutes_every_token() {
        let template = template(
            "{{filing_type}} due {{deadline}}",
            "Dear {{company_name}}, your {{filing_type}} is due on {{deadline}}. - {{accountant_name}}",
        );
        let rendered = render(&template, &context()).unwrap();
        assert_eq!(rendered.subject, "Corporation Tax Payment due 1 January 2026");
        assert_eq!(
            rendered.text,
            "Dear Bluebird Joinery Ltd, your Corporation Tax Payment is due on 1 January 2026. - Harris & Co"
        );
        assert_eq!(
            rendered.html,
            "<p>Dear Bluebird Joinery Ltd, your Corporation Tax Payment is due on 1 January 2026. - Harris & Co</p>"
        );
    }

    #[test]
    fn it_allows_whitespace_inside_tokens() {
        let template = template("Hello {{ company_name }}", "no tokens here");
        let rendered = render(&template, &context()).unwrap();
        assert_eq!(rendered.subject, "Hello Bluebird Joinery Ltd");
    }

    #[test]
    fn it_rejects_unknown_tokens() {
        let template = template("Hi {{director_name}}", "body");
        assert_eq!(
            render(&template, &context()),
            Err(RenderError::UnknownToken("director_name".into()))
        );
    }

    #[test]
    fn it_rejects_unbalanced_braces() {
        let template = template("subject", "Dear {{company_name, see you");
        assert_eq!(
            render(&template, &context()),
            Err(RenderError::UnbalancedBraces)
        );
    }
}
