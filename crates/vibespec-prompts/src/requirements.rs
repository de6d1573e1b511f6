//! Implementation guidance attached to the final specification prompt, one
//! block per enabled professional requirement plus an always-on block.

use vibespec_core::{ProfessionalRequirements, RequirementFlag};

pub const MANDATORY_HEADING: &str = "MANDATORY REQUIREMENTS";

/// Distinctive heading that opens each flag's guidance block.
pub fn heading(flag: RequirementFlag) -> &'static str {
    match flag {
        RequirementFlag::UserAccounts => "USER ACCOUNTS & AUTHENTICATION",
        RequirementFlag::SensitiveData => "SENSITIVE DATA PROTECTION",
        RequirementFlag::AdminPanel => "ADMIN DASHBOARD",
        RequirementFlag::MobileResponsive => "MOBILE RESPONSIVE DESIGN",
        RequirementFlag::RealTimeFeatures => "REAL-TIME FEATURES",
        RequirementFlag::FileUploads => "FILE UPLOADS",
        RequirementFlag::Payments => "PAYMENT PROCESSING",
        RequirementFlag::SearchFeature => "SEARCH FUNCTIONALITY",
        RequirementFlag::Analytics => "ANALYTICS & TRACKING",
        RequirementFlag::MultiLanguage => "MULTI-LANGUAGE SUPPORT",
    }
}

/// Guidance body for a flag, without its heading.
pub fn detail(flag: RequirementFlag) -> &'static str {
    match flag {
        RequirementFlag::UserAccounts => {
            "- Email/password sign-up with email verification before first login\n\
             - Password hashing with bcrypt (12+ rounds); minimum 12 characters\n\
             - Password reset via single-use, time-limited tokens (expire after 1 hour)\n\
             - Sessions in httpOnly, Secure, SameSite=Strict cookies; never in localStorage\n\
             - Refresh token rotation with server-side revocation on logout\n\
             - Account lockout or progressive delay after 5 failed login attempts\n\
             - Profile page where users can update their details and delete their account\n\
             - Optional OAuth sign-in (Google, GitHub) behind a feature flag\n"
        }
        RequirementFlag::SensitiveData => {
            "- HTTPS everywhere with HSTS (max-age at least 1 year)\n\
             - Encrypt sensitive columns at rest; keys held in a managed KMS, never in the repo\n\
             - Row-level security so users can only read their own records\n\
             - Input validation with schema validators on every endpoint; output encoding against XSS\n\
             - Security headers: Content-Security-Policy, X-Frame-Options, Referrer-Policy\n\
             - Privacy policy page and GDPR flows: data export, data deletion, consent records\n\
             - Redact personal data from logs and error reports\n"
        }
        RequirementFlag::AdminPanel => {
            "- Separate admin area behind role-based access control (admin, editor, viewer)\n\
             - Admin actions require re-authentication for destructive operations\n\
             - User management: search, suspend, reset password, change role\n\
             - Content management screens with draft/publish states\n\
             - Audit log of every admin action (who, what, when, before/after values)\n\
             - Dashboard with key metrics: sign-ups, active users, errors\n"
        }
        RequirementFlag::MobileResponsive => {
            "- Mobile-first layouts with breakpoints at 640px, 768px, 1024px and 1280px\n\
             - Touch targets at least 44x44px; no hover-only interactions\n\
             - Collapsible navigation menu on small screens\n\
             - Responsive images with srcset and lazy loading\n\
             - Test on iOS Safari and Android Chrome at 360px width minimum\n\
             - Keep the mobile JavaScript bundle under the 300KB gzipped budget\n"
        }
        RequirementFlag::RealTimeFeatures => {
            "- WebSocket or managed realtime channel with automatic reconnect and backoff\n\
             - Authenticate the realtime connection with the same session as HTTP requests\n\
             - Live notifications with unread counts persisted server-side\n\
             - Presence indicators with heartbeat timeout (30 seconds)\n\
             - Conflict resolution strategy for concurrent edits (last-write-wins or versioned updates)\n\
             - Graceful degradation to polling when the realtime channel is unavailable\n"
        }
        RequirementFlag::FileUploads => {
            "- Validate file type by content (magic bytes) as well as extension\n\
             - Size limits per file type (e.g. images 10MB, documents 25MB)\n\
             - Upload directly to cloud object storage with short-lived signed URLs\n\
             - Virus scanning before files become accessible to other users\n\
             - Image optimization: resize, compress and serve modern formats (WebP/AVIF)\n\
             - Serve files through a CDN; private files only via signed, expiring links\n"
        }
        RequirementFlag::Payments => {
            "- Stripe integration using hosted Checkout or Payment Elements; never handle raw card data\n\
             - Products, prices and subscriptions defined in Stripe and mirrored in the database\n\
             - Webhook endpoint with signature verification and idempotent event handling\n\
             - Order states: pending, paid, failed, refunded; transitions driven by webhooks only\n\
             - Receipts emailed after successful payment\n\
             - Refund handling from the admin area with audit trail\n\
             - Test mode keys in development; PCI DSS SAQ A scope maintained\n"
        }
        RequirementFlag::SearchFeature => {
            "- Full-text search index (PostgreSQL tsvector or a hosted search service)\n\
             - Typo-tolerant fuzzy matching and relevance ranking\n\
             - Filters and sorting exposed as query parameters so results are shareable\n\
             - Autocomplete with 200ms debounce\n\
             - Paginated results; p95 search latency under 300ms\n\
             - Empty-state and no-results messaging with suggestions\n"
        }
        RequirementFlag::Analytics => {
            "- Privacy-friendly analytics integration with cookie consent where required\n\
             - Event tracking plan: named events, properties and the user action that fires each\n\
             - Key funnels defined (e.g. visit, sign-up, activation, purchase)\n\
             - Do not send personal data to analytics providers\n\
             - Dashboard showing daily active users, retention and conversion\n"
        }
        RequirementFlag::MultiLanguage => {
            "- i18n framework with translation files per locale; no hard-coded UI strings\n\
             - Language switcher persisted per user; default from the browser locale\n\
             - Locale-aware formatting for dates, numbers and currency\n\
             - Right-to-left layout support for RTL languages\n\
             - Translation workflow: missing-key detection in CI\n"
        }
    }
}

/// Guidance block for a flag identifier such as `"payments"`. Unknown
/// identifiers yield an empty string.
pub fn detail_for_id(id: &str) -> &'static str {
    RequirementFlag::parse_str(id).map(detail).unwrap_or("")
}

/// Append the heading and guidance for every enabled flag.
pub fn append_enabled(prompt: &mut String, requirements: &ProfessionalRequirements) {
    for flag in requirements.enabled() {
        prompt.push_str(&format!("### {}\n", heading(flag)));
        prompt.push_str(detail(flag));
        prompt.push('\n');
    }
}

/// Append the block every specification carries regardless of flags.
pub fn append_mandatory(prompt: &mut String) {
    prompt.push_str(&format!("## {MANDATORY_HEADING}\n\n"));
    prompt.push_str(
        "Include all of the following in every specification:\n\
         - Error Handling: typed errors at every boundary, user-friendly messages, \
         error boundaries in the UI, no silent failures\n\
         - Logging: structured JSON logs with correlation IDs and log levels; \
         never log secrets or personal data\n\
         - Accessibility: WCAG 2.1 AA, keyboard navigation, visible focus states, \
         semantic HTML, alt text, automated axe-core checks\n\
         - Performance: LCP < 2.5s, CLS < 0.1, TBT < 300ms, code splitting and caching headers\n\
         - SEO: semantic markup, meta tags, sitemap.xml, robots.txt, Open Graph tags\n\
         - Documentation: README with setup steps, architecture overview, \
         API reference and environment variable list\n\
         - Git Workflow: feature branches, pull requests with review, \
         conventional commits, protected main branch\n\
         - Environment Management: .env.example committed, separate development, \
         staging and production configuration, secrets outside the repository\n\
         - Deployment: automated CI/CD with tests as a gate, preview deployments, \
         documented rollback procedure\n\n",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_flag_has_guidance() {
        for flag in RequirementFlag::ALL {
            assert!(!detail(*flag).is_empty(), "{flag} has no guidance");
        }
    }

    #[test]
    fn lookup_by_id() {
        assert!(detail_for_id("payments").contains("Stripe"));
        assert_eq!(detail_for_id("teleportation"), "");
    }

    #[test]
    fn only_enabled_headings_are_appended() {
        let reqs = ProfessionalRequirements::default()
            .with(RequirementFlag::UserAccounts, true)
            .with(RequirementFlag::Payments, true);
        let mut out = String::new();
        append_enabled(&mut out, &reqs);
        assert!(out.contains("### USER ACCOUNTS & AUTHENTICATION"));
        assert!(out.contains("### PAYMENT PROCESSING"));
        assert!(!out.contains("ADMIN DASHBOARD"));
        assert!(out.find("USER ACCOUNTS").unwrap() < out.find("PAYMENT PROCESSING").unwrap());
    }

    #[test]
    fn mandatory_block_names_no_flag_heading() {
        let mut out = String::new();
        append_mandatory(&mut out);
        assert!(out.contains(MANDATORY_HEADING));
        assert!(out.contains("Error Handling"));
        assert!(out.contains("Accessibility"));
        for flag in RequirementFlag::ALL {
            assert!(!out.contains(heading(*flag)), "mandatory block leaks {flag}");
        }
    }

    #[test]
    fn headings_are_distinct() {
        for a in RequirementFlag::ALL {
            for b in RequirementFlag::ALL {
                if a != b {
                    assert!(!heading(*a).contains(heading(*b)));
                }
            }
        }
    }
}
