use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementFlag {
    UserAccounts,
    SensitiveData,
    AdminPanel,
    MobileResponsive,
    RealTimeFeatures,
    FileUploads,
    Payments,
    SearchFeature,
    Analytics,
    MultiLanguage,
}

impl RequirementFlag {
    pub const ALL: &[RequirementFlag] = &[
        RequirementFlag::UserAccounts,
        RequirementFlag::SensitiveData,
        RequirementFlag::AdminPanel,
        RequirementFlag::MobileResponsive,
        RequirementFlag::RealTimeFeatures,
        RequirementFlag::FileUploads,
        RequirementFlag::Payments,
        RequirementFlag::SearchFeature,
        RequirementFlag::Analytics,
        RequirementFlag::MultiLanguage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementFlag::UserAccounts => "userAccounts",
            RequirementFlag::SensitiveData => "sensitiveData",
            RequirementFlag::AdminPanel => "adminPanel",
            RequirementFlag::MobileResponsive => "mobileResponsive",
            RequirementFlag::RealTimeFeatures => "realTimeFeatures",
            RequirementFlag::FileUploads => "fileUploads",
            RequirementFlag::Payments => "payments",
            RequirementFlag::SearchFeature => "searchFeature",
            RequirementFlag::Analytics => "analytics",
            RequirementFlag::MultiLanguage => "multiLanguage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequirementFlag::UserAccounts => "User Accounts & Login",
            RequirementFlag::SensitiveData => "Sensitive Data Handling",
            RequirementFlag::AdminPanel => "Admin Dashboard",
            RequirementFlag::MobileResponsive => "Mobile-Friendly Design",
            RequirementFlag::RealTimeFeatures => "Real-Time Updates",
            RequirementFlag::FileUploads => "File Uploads",
            RequirementFlag::Payments => "Payment Processing",
            RequirementFlag::SearchFeature => "Search Functionality",
            RequirementFlag::Analytics => "Usage Analytics",
            RequirementFlag::MultiLanguage => "Multiple Languages",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RequirementFlag::UserAccounts => {
                "Users can create accounts, login, and have personalized experiences"
            }
            RequirementFlag::SensitiveData => {
                "You'll handle personal info, financial data, or private content"
            }
            RequirementFlag::AdminPanel => {
                "Need a backend interface to manage content, users, or settings"
            }
            RequirementFlag::MobileResponsive => {
                "Works perfectly on phones and tablets, not just computers"
            }
            RequirementFlag::RealTimeFeatures => {
                "Content updates instantly without refreshing (live notifications, chat, etc.)"
            }
            RequirementFlag::FileUploads => {
                "Users can upload images, documents, videos, or other files"
            }
            RequirementFlag::Payments => "Users can purchase products, subscriptions, or services",
            RequirementFlag::SearchFeature => {
                "Users can search through your content, products, or data"
            }
            RequirementFlag::Analytics => {
                "Track how users interact with your app (page views, clicks, conversions)"
            }
            RequirementFlag::MultiLanguage => {
                "Support for different languages (internationalization)"
            }
        }
    }

    /// What enabling the flag pulls into the project.
    pub fn implications(&self) -> &'static [&'static str] {
        match self {
            RequirementFlag::UserAccounts => &[
                "Authentication system",
                "Password reset flow",
                "Email verification",
                "Session management",
                "Profile pages",
            ],
            RequirementFlag::SensitiveData => &[
                "Data encryption",
                "HTTPS/SSL",
                "Privacy policy",
                "GDPR compliance",
                "Security headers",
                "Input sanitization",
            ],
            RequirementFlag::AdminPanel => &[
                "Admin authentication",
                "Content management UI",
                "User management",
                "Analytics dashboard",
                "Role-based access",
            ],
            RequirementFlag::MobileResponsive => &[
                "Responsive layout",
                "Touch-friendly controls",
                "Mobile navigation",
                "Performance optimization",
                "Mobile testing",
            ],
            RequirementFlag::RealTimeFeatures => &[
                "WebSocket connection",
                "Real-time database",
                "Live notifications",
                "Presence indicators",
                "Conflict resolution",
            ],
            RequirementFlag::FileUploads => &[
                "File validation",
                "Cloud storage setup",
                "Image optimization",
                "File size limits",
                "Virus scanning",
                "CDN delivery",
            ],
            RequirementFlag::Payments => &[
                "Payment gateway (Stripe/PayPal)",
                "Checkout flow",
                "Receipt generation",
                "Refund handling",
                "Webhook processing",
                "PCI compliance",
            ],
            RequirementFlag::SearchFeature => &[
                "Search indexing",
                "Fuzzy matching",
                "Filters and sorting",
                "Search autocomplete",
                "Performance optimization",
            ],
            RequirementFlag::Analytics => &[
                "Analytics integration",
                "Event tracking",
                "User behavior metrics",
                "Conversion funnels",
                "Privacy compliance",
            ],
            RequirementFlag::MultiLanguage => &[
                "i18n framework",
                "Translation management",
                "Language switcher",
                "RTL support",
                "Locale-specific formatting",
            ],
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == s)
    }
}

impl fmt::Display for RequirementFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The ten professional-feature toggles, all off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfessionalRequirements {
    pub user_accounts: bool,
    pub sensitive_data: bool,
    pub admin_panel: bool,
    pub mobile_responsive: bool,
    pub real_time_features: bool,
    pub file_uploads: bool,
    pub payments: bool,
    pub search_feature: bool,
    pub analytics: bool,
    pub multi_language: bool,
}

impl ProfessionalRequirements {
    pub fn is_enabled(&self, flag: RequirementFlag) -> bool {
        match flag {
            RequirementFlag::UserAccounts => self.user_accounts,
            RequirementFlag::SensitiveData => self.sensitive_data,
            RequirementFlag::AdminPanel => self.admin_panel,
            RequirementFlag::MobileResponsive => self.mobile_responsive,
            RequirementFlag::RealTimeFeatures => self.real_time_features,
            RequirementFlag::FileUploads => self.file_uploads,
            RequirementFlag::Payments => self.payments,
            RequirementFlag::SearchFeature => self.search_feature,
            RequirementFlag::Analytics => self.analytics,
            RequirementFlag::MultiLanguage => self.multi_language,
        }
    }

    pub fn with(&self, flag: RequirementFlag, enabled: bool) -> Self {
        let mut next = *self;
        let slot = match flag {
            RequirementFlag::UserAccounts => &mut next.user_accounts,
            RequirementFlag::SensitiveData => &mut next.sensitive_data,
            RequirementFlag::AdminPanel => &mut next.admin_panel,
            RequirementFlag::MobileResponsive => &mut next.mobile_responsive,
            RequirementFlag::RealTimeFeatures => &mut next.real_time_features,
            RequirementFlag::FileUploads => &mut next.file_uploads,
            RequirementFlag::Payments => &mut next.payments,
            RequirementFlag::SearchFeature => &mut next.search_feature,
            RequirementFlag::Analytics => &mut next.analytics,
            RequirementFlag::MultiLanguage => &mut next.multi_language,
        };
        *slot = enabled;
        next
    }

    pub fn toggled(&self, flag: RequirementFlag) -> Self {
        self.with(flag, !self.is_enabled(flag))
    }

    /// Enabled flags in declaration order.
    pub fn enabled(&self) -> Vec<RequirementFlag> {
        RequirementFlag::ALL
            .iter()
            .copied()
            .filter(|f| self.is_enabled(*f))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.enabled().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_ids_roundtrip() {
        for f in RequirementFlag::ALL {
            assert_eq!(RequirementFlag::parse_str(f.as_str()), Some(*f));
        }
        assert_eq!(RequirementFlag::parse_str("darkMode"), None);
    }

    #[test]
    fn flag_ids_match_serialized_keys() {
        let all_on = RequirementFlag::ALL
            .iter()
            .fold(ProfessionalRequirements::default(), |acc, f| acc.with(*f, true));
        let json = serde_json::to_value(all_on).unwrap();
        for f in RequirementFlag::ALL {
            assert_eq!(json[f.as_str()], true, "missing key {}", f.as_str());
        }
    }

    #[test]
    fn toggle_and_count() {
        let reqs = ProfessionalRequirements::default()
            .toggled(RequirementFlag::Payments)
            .toggled(RequirementFlag::UserAccounts)
            .toggled(RequirementFlag::Analytics)
            .toggled(RequirementFlag::Analytics);
        assert_eq!(reqs.selected_count(), 2);
        assert_eq!(
            reqs.enabled(),
            vec![RequirementFlag::UserAccounts, RequirementFlag::Payments]
        );
    }

    #[test]
    fn every_flag_has_implications() {
        for f in RequirementFlag::ALL {
            assert!(f.implications().len() >= 5, "{f} has too few implications");
        }
    }
}
