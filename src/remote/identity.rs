use super::*;

impl RemoteClient {
    pub async fn me(&self) -> Result<AuthorRef, ApiError> {
        let req = self.request(reqwest::Method::GET, "/api/authors/me");
        self.send_json(req, "identity probe").await
    }

    /// Where the browser goes to start the OAuth sign-in.
    pub fn login_url(&self) -> String {
        self.url("/api/auth/login")
    }

    /// Clears the session cookie server-side and redirects home.
    pub fn logout_url(&self) -> String {
        self.url("/api/auth/logout")
    }
}
