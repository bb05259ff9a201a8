//! Password candidates for encrypted statements.
//!
//! Banks lock statements with the holder's birth date or ID digits, so a
//! resolver is asked for one candidate per attempt until a candidate unlocks
//! the document or the resolver runs out.

/// Supplies the password to try on a given attempt (0-based), or `None`.
pub trait PasswordResolver: Send + Sync {
    fn resolve(&self, attempt: u32) -> Option<String>;
}

/// Never supplies a password.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPassword;

impl PasswordResolver for NoPassword {
    fn resolve(&self, _attempt: u32) -> Option<String> {
        None
    }
}

/// A fixed list of candidates tried in order.
#[derive(Debug, Clone, Default)]
pub struct PasswordList(Vec<String>);

impl PasswordList {
    pub fn new<S: Into<String>>(candidates: impl IntoIterator<Item = S>) -> Self {
        Self(candidates.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PasswordResolver for PasswordList {
    fn resolve(&self, attempt: u32) -> Option<String> {
        self.0.get(attempt as usize).cloned()
    }
}

impl<F> PasswordResolver for F
where
    F: Fn(u32) -> Option<String> + Send + Sync,
{
    fn resolve(&self, attempt: u32) -> Option<String> {
        self(attempt)
    }
}
