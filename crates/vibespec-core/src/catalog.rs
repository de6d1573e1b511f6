use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::VibespecError;
use crate::project::{ProjectType, TechStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    Frontend,
    Backend,
    Database,
    Hosting,
}

impl TechCategory {
    pub const ALL: &[TechCategory] = &[
        TechCategory::Frontend,
        TechCategory::Backend,
        TechCategory::Database,
        TechCategory::Hosting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TechCategory::Frontend => "frontend",
            TechCategory::Backend => "backend",
            TechCategory::Database => "database",
            TechCategory::Hosting => "hosting",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TechCategory::Frontend => "Frontend",
            TechCategory::Backend => "Backend",
            TechCategory::Database => "Database",
            TechCategory::Hosting => "Hosting",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "frontend" => Some(TechCategory::Frontend),
            "backend" => Some(TechCategory::Backend),
            "database" => Some(TechCategory::Database),
            "hosting" => Some(TechCategory::Hosting),
            _ => None,
        }
    }
}

impl fmt::Display for TechCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Easy,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "hard")]
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pros: Vec<String>,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOptions {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub options: Vec<TechOption>,
}

/// Per-category technology choices offered on the tech-stack step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechOptionCatalog {
    pub frontend: CategoryOptions,
    pub backend: CategoryOptions,
    pub database: CategoryOptions,
    pub hosting: CategoryOptions,
}

impl TechOptionCatalog {
    pub fn category(&self, category: TechCategory) -> &CategoryOptions {
        match category {
            TechCategory::Frontend => &self.frontend,
            TechCategory::Backend => &self.backend,
            TechCategory::Database => &self.database,
            TechCategory::Hosting => &self.hosting,
        }
    }

    pub fn find(&self, category: TechCategory, value: &str) -> Option<&TechOption> {
        self.category(category)
            .options
            .iter()
            .find(|o| o.value == value)
    }

    /// Rejects catalogs the tech-stack step could not offer a choice from.
    pub fn validate(&self) -> Result<(), VibespecError> {
        for category in TechCategory::ALL {
            let options = &self.category(*category).options;
            if options.is_empty() {
                return Err(VibespecError::InvalidCatalog(format!(
                    "{} has no options",
                    category.as_str()
                )));
            }
            if options.iter().any(|o| o.value.trim().is_empty()) {
                return Err(VibespecError::InvalidCatalog(format!(
                    "{} has an option without a value",
                    category.as_str()
                )));
            }
        }
        Ok(())
    }

    /// Static catalog used whenever a generated one is unavailable.
    pub fn fallback(project_type: Option<ProjectType>) -> Self {
        match project_type {
            Some(ProjectType::MobileApp) => mobile_catalog(),
            Some(ProjectType::Game) => game_catalog(),
            _ => web_catalog(),
        }
    }
}

fn opt(
    value: &str,
    label: &str,
    description: &str,
    pros: [&str; 3],
    difficulty: Difficulty,
) -> TechOption {
    TechOption {
        value: value.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        pros: pros.iter().map(|p| p.to_string()).collect(),
        difficulty,
    }
}

fn category(title: &str, description: &str, options: Vec<TechOption>) -> CategoryOptions {
    CategoryOptions {
        title: title.to_string(),
        description: description.to_string(),
        options,
    }
}

fn mobile_catalog() -> TechOptionCatalog {
    use Difficulty::*;
    TechOptionCatalog {
        frontend: category(
            "Mobile Development Framework",
            "Technologies for building mobile applications",
            vec![
                opt("react-native", "React Native", "Cross-platform with JavaScript", ["Single codebase", "Native performance", "Large community"], Medium),
                opt("flutter", "Flutter", "Google's cross-platform framework", ["Fast development", "Single codebase", "Great performance"], Medium),
                opt("swift", "Swift (iOS)", "Native iOS development", ["Best iOS performance", "Apple ecosystem", "Latest features"], Hard),
                opt("kotlin", "Kotlin (Android)", "Native Android development", ["Best Android performance", "Google preferred", "Modern language"], Hard),
                opt("ionic", "Ionic", "Web technologies for mobile", ["Web skills reuse", "Rapid prototyping", "Plugin ecosystem"], Easy),
            ],
        ),
        backend: category(
            "Backend Services",
            "Server-side logic and APIs",
            vec![
                opt("firebase", "Firebase", "Google's mobile backend platform", ["Real-time sync", "Authentication", "Push notifications"], Easy),
                opt("supabase", "Supabase", "Open source Firebase alternative", ["PostgreSQL", "Real-time", "Self-hostable"], Easy),
                opt("node", "Node.js", "JavaScript backend", ["Same language", "Fast development", "Large ecosystem"], Medium),
            ],
        ),
        database: category(
            "Data Storage",
            "Where your app stores data",
            vec![
                opt("firebase-firestore", "Firestore", "Google's NoSQL database", ["Real-time sync", "Offline support", "Scalable"], Easy),
                opt("supabase", "Supabase PostgreSQL", "Managed PostgreSQL", ["SQL database", "Real-time", "Row-level security"], Easy),
                opt("sqlite", "SQLite", "Local database", ["Offline-first", "No server needed", "Fast queries"], Easy),
            ],
        ),
        hosting: category(
            "App Distribution",
            "How users get your app",
            vec![
                opt("app-stores", "App Stores", "iOS App Store and Google Play", ["Maximum reach", "Built-in payments", "User trust"], Medium),
                opt("expo", "Expo", "React Native deployment platform", ["Easy updates", "No app store review", "Quick testing"], Easy),
                opt("testflight", "TestFlight + Play Console", "Beta testing platforms", ["User feedback", "Gradual rollout", "Testing tools"], Medium),
            ],
        ),
    }
}

fn game_catalog() -> TechOptionCatalog {
    use Difficulty::*;
    TechOptionCatalog {
        frontend: category(
            "Game Engine",
            "Framework for building your game",
            vec![
                opt("unity", "Unity", "Popular cross-platform game engine", ["Visual editor", "Cross-platform", "Asset store"], Medium),
                opt("godot", "Godot", "Open source game engine", ["Free and open", "Lightweight", "Easy scripting"], Easy),
                opt("phaser", "Phaser", "HTML5 game framework", ["Web-based", "JavaScript", "Great for 2D"], Easy),
                opt("unreal", "Unreal Engine", "Professional game engine", ["AAA quality", "Visual scripting", "Great graphics"], Hard),
            ],
        ),
        backend: category(
            "Backend Services",
            "Online features and data storage",
            vec![
                opt("none", "No Backend", "Offline game only", ["Simpler to build", "No server costs", "Works offline"], Easy),
                opt("firebase", "Firebase", "Google gaming backend", ["Leaderboards", "Player accounts", "Real-time multiplayer"], Medium),
                opt("playfab", "PlayFab", "Gaming backend service", ["Built for games", "Analytics", "Monetization tools"], Medium),
            ],
        ),
        database: category(
            "Data Storage",
            "Saving game progress and player data",
            vec![
                opt("local", "Local Storage", "Save on device only", ["No internet needed", "Free", "Simple"], Easy),
                opt("firebase", "Firebase", "Cloud storage for games", ["Cross-device sync", "Leaderboards", "Easy setup"], Easy),
                opt("playfab", "PlayFab Storage", "Gaming-focused storage", ["Player profiles", "Game analytics", "Cloud saves"], Medium),
            ],
        ),
        hosting: category(
            "Distribution Platform",
            "How players access your game",
            vec![
                opt("itch", "Itch.io", "Indie game platform", ["Easy publishing", "Indie-friendly", "Built-in community"], Easy),
                opt("steam", "Steam", "Major PC gaming platform", ["Largest audience", "Workshop support", "Built-in payments"], Hard),
                opt("web", "Web Hosting", "Browser-based game", ["Play anywhere", "No download", "Easy sharing"], Easy),
                opt("app-stores", "Mobile App Stores", "iOS/Android stores", ["Mobile reach", "In-app purchases", "Discovery"], Medium),
            ],
        ),
    }
}

fn web_catalog() -> TechOptionCatalog {
    use Difficulty::*;
    TechOptionCatalog {
        frontend: category(
            "User Interface (Frontend)",
            "What users see and interact with",
            vec![
                opt("react", "React", "Popular and flexible", ["Large community", "Lots of resources", "Very flexible"], Medium),
                opt("vue", "Vue.js", "Easy to learn", ["Beginner friendly", "Good documentation", "Gentle learning curve"], Easy),
                opt("nextjs", "Next.js", "React with extra features", ["SEO friendly", "Fast performance", "Built-in features"], Medium),
                opt("vanilla", "HTML/CSS/JS", "Pure web basics", ["No framework", "Simple to start", "Full control"], Easy),
            ],
        ),
        backend: category(
            "Server Logic (Backend)",
            "Handles data processing",
            vec![
                opt("node", "Node.js", "JavaScript everywhere", ["Same language", "Large ecosystem", "Good performance"], Medium),
                opt("supabase", "Supabase", "Backend as a service", ["Quick setup", "Built-in auth", "Real-time features"], Easy),
                opt("firebase", "Firebase", "Google backend platform", ["Easy to start", "No server setup", "Free tier"], Easy),
                opt("none", "No Backend", "Static site only", ["Fastest setup", "Lowest cost", "No complexity"], Easy),
            ],
        ),
        database: category(
            "Data Storage",
            "Where your app stores information",
            vec![
                opt("supabase", "Supabase (PostgreSQL)", "Modern database platform", ["SQL database", "Real-time updates", "Built-in auth"], Easy),
                opt("firebase", "Firebase Firestore", "NoSQL cloud database", ["Easy setup", "Real-time sync", "Offline support"], Easy),
                opt("mongodb", "MongoDB", "Flexible NoSQL database", ["Flexible schema", "Scales well", "Popular choice"], Medium),
                opt("none", "No Database", "Static data only", ["Simplest option", "No setup", "Perfect for simple sites"], Easy),
            ],
        ),
        hosting: category(
            "Hosting Platform",
            "Where your app lives online",
            vec![
                opt("vercel", "Vercel", "Modern deployment platform", ["Git integration", "Auto deploy", "Free tier"], Easy),
                opt("netlify", "Netlify", "Web app hosting", ["Easy setup", "Free tier", "Great for static"], Easy),
                opt("aws", "AWS", "Amazon cloud services", ["Highly scalable", "Full control", "Industry standard"], Hard),
                opt("heroku", "Heroku", "Simple app hosting", ["Easy deployment", "Good for beginners", "Add-ons available"], Easy),
            ],
        ),
    }
}

fn mentions_any(features: &[String], needles: &[&str]) -> bool {
    features.iter().any(|f| {
        let lower = f.to_lowercase();
        needles.iter().any(|n| lower.contains(n))
    })
}

/// Picks a starting stack from the project type, its features and the
/// options actually on offer.
///
/// Mobile and game projects get fixed picks. Web-like projects prefer a
/// named option when the catalog has it and otherwise take the first one.
pub fn recommended_stack(
    project_type: Option<ProjectType>,
    features: &[String],
    catalog: &TechOptionCatalog,
) -> TechStack {
    let has_auth = mentions_any(features, &["auth", "login", "user"]);
    let has_data = mentions_any(features, &["data", "store", "save"]);
    let is_complex = features.len() > 5;

    match project_type {
        Some(ProjectType::MobileApp) => TechStack {
            frontend: "react-native".into(),
            backend: "firebase".into(),
            database: "firebase-firestore".into(),
            hosting: "app-stores".into(),
        },
        Some(ProjectType::Game) => {
            let online = has_auth || has_data;
            TechStack {
                frontend: "phaser".into(),
                backend: String::from(if online { "firebase" } else { "none" }),
                database: String::from(if online { "firebase" } else { "local" }),
                hosting: "web".into(),
            }
        }
        _ => {
            let prefer = |category: TechCategory, value: &str| -> String {
                let options = &catalog.category(category).options;
                options
                    .iter()
                    .find(|o| o.value == value)
                    .or_else(|| options.first())
                    .map(|o| o.value.clone())
                    .unwrap_or_default()
            };
            let simple_site = project_type == Some(ProjectType::Website) && !is_complex;
            TechStack {
                frontend: prefer(
                    TechCategory::Frontend,
                    if simple_site { "vanilla" } else { "react" },
                ),
                backend: prefer(
                    TechCategory::Backend,
                    if has_auth || has_data || is_complex { "node" } else { "none" },
                ),
                database: prefer(
                    TechCategory::Database,
                    if has_auth || has_data { "supabase" } else { "none" },
                ),
                hosting: prefer(TechCategory::Hosting, "vercel"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fallback_is_keyed_by_project_type() {
        let mobile = TechOptionCatalog::fallback(Some(ProjectType::MobileApp));
        assert_eq!(mobile.frontend.options[0].value, "react-native");
        assert_eq!(mobile.hosting.title, "App Distribution");

        let game = TechOptionCatalog::fallback(Some(ProjectType::Game));
        assert_eq!(game.frontend.title, "Game Engine");

        let web = TechOptionCatalog::fallback(Some(ProjectType::Ecommerce));
        assert_eq!(web, TechOptionCatalog::fallback(None));
        assert_eq!(web.hosting.options[0].value, "vercel");
    }

    #[test]
    fn fallback_catalogs_are_valid() {
        for t in ProjectType::ALL {
            let catalog = TechOptionCatalog::fallback(Some(*t));
            assert!(catalog.validate().is_ok(), "{t} fallback invalid");
            for c in TechCategory::ALL {
                for o in &catalog.category(*c).options {
                    assert_eq!(o.pros.len(), 3);
                }
            }
        }
    }

    #[test]
    fn validate_rejects_empty_category() {
        let mut catalog = TechOptionCatalog::fallback(None);
        catalog.database.options.clear();
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("database"));
    }

    #[test]
    fn difficulty_accepts_lowercase() {
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
        assert_eq!(serde_json::to_string(&Difficulty::Easy).unwrap(), "\"Easy\"");
    }

    #[test]
    fn recommends_simple_stack_for_small_website() {
        let catalog = TechOptionCatalog::fallback(Some(ProjectType::Website));
        let stack = recommended_stack(
            Some(ProjectType::Website),
            &features(&["Gallery", "Contact form", "About page"]),
            &catalog,
        );
        assert_eq!(stack.frontend, "vanilla");
        assert_eq!(stack.backend, "none");
        assert_eq!(stack.database, "none");
        assert_eq!(stack.hosting, "vercel");
    }

    #[test]
    fn recommends_backend_when_features_need_accounts() {
        let catalog = TechOptionCatalog::fallback(Some(ProjectType::WebApp));
        let stack = recommended_stack(
            Some(ProjectType::WebApp),
            &features(&["User Login", "Dashboard", "Search"]),
            &catalog,
        );
        assert_eq!(stack.frontend, "react");
        assert_eq!(stack.backend, "node");
        assert_eq!(stack.database, "supabase");
    }

    #[test]
    fn complex_website_gets_react_and_node() {
        let catalog = TechOptionCatalog::fallback(Some(ProjectType::Website));
        let stack = recommended_stack(
            Some(ProjectType::Website),
            &features(&["A", "B", "C", "D", "E", "F"]),
            &catalog,
        );
        assert_eq!(stack.frontend, "react");
        assert_eq!(stack.backend, "node");
        assert_eq!(stack.database, "none");
    }

    #[test]
    fn missing_preferred_option_falls_back_to_first() {
        let mut catalog = TechOptionCatalog::fallback(None);
        catalog.frontend.options.retain(|o| o.value != "react");
        catalog.hosting.options.retain(|o| o.value != "vercel");
        let stack = recommended_stack(Some(ProjectType::WebApp), &features(&["Blog"]), &catalog);
        assert_eq!(stack.frontend, "vue");
        assert_eq!(stack.hosting, "netlify");
    }

    #[test]
    fn game_stack_goes_online_only_when_needed() {
        let catalog = TechOptionCatalog::fallback(Some(ProjectType::Game));
        let offline = recommended_stack(Some(ProjectType::Game), &features(&["Levels"]), &catalog);
        assert_eq!(offline.backend, "none");
        assert_eq!(offline.database, "local");

        let online =
            recommended_stack(Some(ProjectType::Game), &features(&["Save progress"]), &catalog);
        assert_eq!(online.backend, "firebase");
        assert_eq!(online.database, "firebase");
        assert_eq!(online.hosting, "web");
    }

    #[test]
    fn mobile_stack_is_fixed() {
        let catalog = TechOptionCatalog::fallback(Some(ProjectType::MobileApp));
        let stack = recommended_stack(Some(ProjectType::MobileApp), &[], &catalog);
        assert_eq!(stack.frontend, "react-native");
        assert_eq!(stack.database, "firebase-firestore");
        assert!(stack.is_complete());
    }
}
