const EMAIL_SETUP: &str = "\
📧 Email Monitor Setup

Step 1: turn on LinkedIn email notifications
  1. LinkedIn > Settings & Privacy > Communications > Email frequency.
  2. Enable \"Comments on your posts and mentions\".
  3. Set the frequency to \"Individual emails\" so each comment arrives
     on its own.

Step 2: allow IMAP access (Gmail shown)
  1. Turn on 2-Step Verification for the Google account.
  2. Google Account > Security > 2-Step Verification > App passwords,
     and generate one for Mail.
  3. Use that app password below, not the account password.

Step 3: add the credentials to a .env file next to the binary

  EMAIL_HOST=imap.gmail.com
  EMAIL_PORT=993
  EMAIL_USERNAME=you@gmail.com
  EMAIL_PASSWORD=your-app-password

  Other providers:
  - Outlook: EMAIL_HOST=outlook.office365.com
  - Yahoo: EMAIL_HOST=imap.mail.yahoo.com
  - Anything else: look up the provider's IMAP host and port.

  The same settings can go in an [email] table in config.toml.

Step 4: run email-monitor

Reading notification mail works without API approval and stays within
LinkedIn's terms of service.
";

const API_SETUP: &str = "\
🔑 LinkedIn API Setup

1. Create an app at https://www.linkedin.com/developers/apps
2. Request the products that grant profile and share access.
3. Generate an OAuth 2.0 access token for your account.
4. Add it to a .env file next to the binary:

   LINKEDIN_ACCESS_TOKEN=your-access-token
   LINKEDIN_CLIENT_ID=your-client-id
   LINKEDIN_CLIENT_SECRET=your-client-secret

5. Optionally set LINKEDIN_PERSON_URN=urn:li:person:<id> to skip the
   profile lookup when choosing whose posts to read.
";

const ALTERNATIVES: &str = "\
🔄 Alternative Approaches

Reading comments through the LinkedIn API needs partner-level access that
most personal apps are not granted. Other ways to keep up with comments:

1. 📱 LinkedIn notifications
   - Turn on email notifications for comments.
   - Use push notifications in the mobile app.
   - Check the notification bell at https://www.linkedin.com/notifications/

2. 🤖 Browser automation
   - Tools like Selenium can script the checking.
   - ⚠️ This may violate the LinkedIn Terms of Service and can get the
     account suspended.

3. 📧 Email monitoring
   - LinkedIn emails a notification for each comment.
   - Run email-monitor against the inbox that receives them.

4. 📊 LinkedIn analytics
   - Built-in post analytics, available in Creator Mode.
   - Shows engagement metrics and trends over time.

5. 🔔 Manual checking
   - Set a reminder and review your activity feed.

Recommended: enable LinkedIn email notifications and run email-monitor.
";

/// Steps for configuring mailbox access.
pub fn email_setup_guide() -> &'static str {
    EMAIL_SETUP
}

/// Steps for obtaining an API access token.
pub fn api_setup_guide() -> &'static str {
    API_SETUP
}

pub fn alternative_approaches() -> &'static str {
    ALTERNATIVES
}
