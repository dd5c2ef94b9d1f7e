/// Read/write access to the current access token.
///
/// The application shell owns the implementation; it is typically an
/// in-memory slot that never touches disk.
pub trait TokenStore: Send + Sync {
    fn access_token(&self) -> Option<String>;

    fn set_access_token(&self, token: Option<String>);

    fn clear(&self) {
        self.set_access_token(None);
    }
}
