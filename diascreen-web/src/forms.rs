//! Form field validation
//!
//! Field constraints are plain data. Each rule checks one submitted value
//! and returns a typed result; nothing here raises through the framework.

/// Length constraints for one form field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub label: &'static str,
    pub min_len: usize,
    pub max_len: usize,
}

/// Username: 4-20 characters
pub const USERNAME_RULE: FieldRule = FieldRule {
    label: "Username",
    min_len: 4,
    max_len: 20,
};

/// Password: 8-20 characters
pub const PASSWORD_RULE: FieldRule = FieldRule {
    label: "Password",
    min_len: 8,
    max_len: 20,
};

impl FieldRule {
    /// Check a submitted value against this rule
    pub fn check(&self, value: &str) -> Result<(), String> {
        let len = value.chars().count();
        if len == 0 {
            return Err(format!("{} is required", self.label));
        }
        if len < self.min_len || len > self.max_len {
            return Err(format!(
                "{} must be between {} and {} characters",
                self.label, self.min_len, self.max_len
            ));
        }
        Ok(())
    }
}

/// Check both credential fields, reporting the first violation
pub fn check_credentials(username: &str, password: &str) -> Result<(), String> {
    USERNAME_RULE.check(username)?;
    PASSWORD_RULE.check(password)?;
    Ok(())
}
