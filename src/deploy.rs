//! Deployment guide printed by `servicehub deploy-guide`

use crate::bootstrap::UPLOAD_DIRS;
use crate::smoke::DEFAULT_BASE_URL;

/// The full guide as plain text
pub fn render() -> String {
    let uploads = UPLOAD_DIRS
        .iter()
        .map(|d| format!("     {}/", d))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\
ServiceHub deployment guide
===========================

1. Prepare the environment
   Run `servicehub bootstrap --dir <backend checkout>` on the server. It
   writes .env with a fresh JWT_SECRET (only if .env is missing), creates

{uploads}

   and installs dependencies. Then edit .env and set at least:
     NODE_ENV=production
     DATABASE_URL           production database connection string
     SMTP_HOST, SMTP_USER, SMTP_PASS
     GATEWAY_A_* / GATEWAY_B_* live payment credentials
     WALLET_API_KEY

2. Build
     npm ci --omit=dev
     npm run build
   Run database migrations before the first start.

3. Run under a process manager
     pm2 start dist/server.js --name servicehub-api
     pm2 save && pm2 startup
   A systemd unit with Restart=always works as well.

4. Put a reverse proxy in front
   Terminate TLS at nginx (or similar) and forward to 127.0.0.1:5000.
   Serve uploads/ as static files and raise client_max_body_size to the
   MAX_UPLOAD_MB value from .env.

5. Verify
     servicehub smoke-test https://<your-domain>
   Locally the default target is {base}. A zero exit status means
   health, auth, services and categories all answered.

6. Operate
   Back up the database and uploads/ daily. Rotate JWT_SECRET by editing
   .env and restarting; existing sessions are invalidated.
",
        uploads = uploads,
        base = DEFAULT_BASE_URL,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_mentions_every_stage() {
        let guide = render();
        for needle in [
            "bootstrap",
            "DATABASE_URL",
            "npm run build",
            "pm2 start",
            "reverse proxy",
            "servicehub smoke-test",
            "uploads/reviews/",
        ] {
            assert!(guide.contains(needle), "guide lacks {}", needle);
        }
    }

    #[test]
    fn test_guide_is_stable() {
        assert_eq!(render(), render());
    }
}
