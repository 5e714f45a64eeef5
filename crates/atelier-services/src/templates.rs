//! HTML bodies for outbound email.

use atelier_core::models::Contract;

/// Escape user-supplied text before interpolating it into HTML.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Reply sent to the person who submitted a contact request: their original
/// details plus the admin's response message.
pub fn contract_response(contract: &Contract, response: &str) -> String {
    let full_name = escape(&contract.full_name);
    let email = escape(&contract.email);
    let occupation = escape(&contract.occupation);
    let message = escape(&contract.message);
    let response = escape(response);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="margin: 0; padding: 0; background-color: #f5f5f5; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;">
  <table role="presentation" style="width: 100%; border-collapse: collapse; padding: 20px 10px;">
    <tr>
      <td align="center">
        <table role="presentation" style="max-width: 600px; width: 100%; background: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 8px rgba(0,0,0,0.08);">
          <tr>
            <td style="background-color: #111827; padding: 40px 30px; text-align: center;">
              <h1 style="margin: 0; color: #ffffff; font-size: 28px; font-weight: 600;">Message Received</h1>
            </td>
          </tr>
          <tr>
            <td style="padding: 40px 30px;">
              <p style="margin: 0 0 24px; font-size: 16px; color: #374151; line-height: 1.6;">
                Hi <strong style="color: #111827;">{full_name}</strong>,
              </p>
              <div style="background-color: #f9fafb; border-left: 3px solid #111827; padding: 16px 20px; margin: 0 0 32px;">
                <p style="margin: 0; font-size: 15px; color: #374151; line-height: 1.7;">{response}</p>
              </div>
              <div style="margin: 0 0 32px;">
                <h2 style="margin: 0 0 16px; color: #111827; font-size: 16px; font-weight: 600; text-transform: uppercase;">Your Details</h2>
                <table style="width: 100%; border-collapse: collapse;">
                  <tr>
                    <td style="padding: 10px 0; border-bottom: 1px solid #e5e7eb; color: #6b7280; font-size: 14px;">Email</td>
                    <td style="padding: 10px 0; border-bottom: 1px solid #e5e7eb; text-align: right; color: #111827; font-size: 14px;">{email}</td>
                  </tr>
                  <tr>
                    <td style="padding: 10px 0; border-bottom: 1px solid #e5e7eb; color: #6b7280; font-size: 14px;">Occupation</td>
                    <td style="padding: 10px 0; border-bottom: 1px solid #e5e7eb; text-align: right; color: #111827; font-size: 14px;">{occupation}</td>
                  </tr>
                  <tr>
                    <td style="padding: 10px 0; color: #6b7280; font-size: 14px; vertical-align: top;">Message</td>
                    <td style="padding: 10px 0; text-align: right; color: #111827; font-size: 14px;">{message}</td>
                  </tr>
                </table>
              </div>
              <p style="margin: 0; font-size: 14px; color: #6b7280; line-height: 1.6; text-align: center;">
                Thank you for reaching out. We'll be in touch soon.
              </p>
            </td>
          </tr>
          <tr>
            <td style="background-color: #111827; height: 4px;"></td>
          </tr>
        </table>
      </td>
    </tr>
  </table>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn contract() -> Contract {
        Contract {
            id: Uuid::new_v4(),
            full_name: "Ada <Lovelace>".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: String::new(),
            occupation: "Engineer".to_string(),
            message: "Hello & goodbye".to_string(),
            status: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn interpolates_and_escapes_fields() {
        let html = contract_response(&contract(), "We'd love to chat");
        assert!(html.contains("Ada &lt;Lovelace&gt;"));
        assert!(html.contains("ada@example.com"));
        assert!(html.contains("Hello &amp; goodbye"));
        assert!(html.contains("We&#39;d love to chat"));
        assert!(!html.contains("<Lovelace>"));
    }
}
