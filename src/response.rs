use serde::Serialize;

/// Success envelope for operations whose payload is just a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_shape() {
        let json = serde_json::to_string(&MessageResponse::new("Logged out successfully")).unwrap();
        assert_eq!(
            json,
            r#"{"success":true,"message":"Logged out successfully"}"#
        );
    }
}
