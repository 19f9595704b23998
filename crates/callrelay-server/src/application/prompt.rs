//! Instruction rendering for new voice sessions

use chrono::{DateTime, Utc};

use callrelay::CallRequest;

const DATE_TIME_PLACEHOLDER: &str = "{currentDateTime}";

/// Fill a prompt template for one call
///
/// `{currentDateTime}` becomes the call time, then each `{name}` becomes the
/// request's variable of that name. Only the first occurrence of each
/// placeholder is replaced.
pub fn render_instructions(template: &str, request: &CallRequest, now: DateTime<Utc>) -> String {
    let current = now.format("%A, %B %-d, %Y at %-I:%M %p UTC").to_string();
    let mut rendered = template.replacen(DATE_TIME_PLACEHOLDER, &current, 1);

    for name in request.variables.keys() {
        let placeholder = format!("{{{}}}", name);
        rendered = rendered.replacen(&placeholder, &request.variable_text(name), 1);
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_render_substitutes_time_and_variables() {
        let now = Utc.with_ymd_and_hms(2024, 10, 15, 14, 5, 0).unwrap();
        let request = CallRequest::new("+15551234567")
            .unwrap()
            .with_variable("firstName", "Ada")
            .with_variable("reason", "");

        let rendered = render_instructions(
            "Now: {currentDateTime}. Hi {firstName}, about {reason}. Bye {firstName}.",
            &request,
            now,
        );

        assert_eq!(
            rendered,
            "Now: Tuesday, October 15, 2024 at 2:05 PM UTC. Hi Ada, about [no reason provided]. Bye {firstName}."
        );
    }

    #[test]
    fn test_unbound_placeholders_are_left_alone() {
        let request = CallRequest::new("+1").unwrap();
        let rendered = render_instructions("Hello {lastName}", &request, Utc::now());
        assert_eq!(rendered, "Hello {lastName}");
    }
}
