use std::fmt;

use serde::{Deserialize, Serialize};

use crate::blank::Keyed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestingApproach {
    Basic,
    Comprehensive,
    Advanced,
}

impl TestingApproach {
    pub const ALL: &[TestingApproach] = &[
        TestingApproach::Basic,
        TestingApproach::Comprehensive,
        TestingApproach::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TestingApproach::Basic => "basic",
            TestingApproach::Comprehensive => "comprehensive",
            TestingApproach::Advanced => "advanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TestingApproach::Basic => "Basic Testing",
            TestingApproach::Comprehensive => "Comprehensive Testing",
            TestingApproach::Advanced => "Advanced Testing",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TestingApproach::Basic => "Essential tests to make sure things work",
            TestingApproach::Comprehensive => "Thorough testing including user scenarios",
            TestingApproach::Advanced => "Full testing suite with continuous monitoring",
        }
    }

    pub fn recommended_for(&self) -> &'static str {
        match self {
            TestingApproach::Basic => "For simple projects",
            TestingApproach::Comprehensive => "For business applications",
            TestingApproach::Advanced => "For complex applications",
        }
    }

    pub fn tools(&self) -> &'static [&'static str] {
        match self {
            TestingApproach::Basic => &["Manual testing", "Browser testing"],
            TestingApproach::Comprehensive => &[
                "Automated tests",
                "User experience testing",
                "Performance testing",
            ],
            TestingApproach::Advanced => &[
                "Unit tests",
                "Integration tests",
                "E2E testing",
                "Performance monitoring",
            ],
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(TestingApproach::Basic),
            "comprehensive" => Some(TestingApproach::Comprehensive),
            "advanced" => Some(TestingApproach::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for TestingApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Keyed for TestingApproach {
    fn key(&self) -> &'static str {
        self.as_str()
    }

    fn from_key(s: &str) -> Option<Self> {
        Self::parse_str(s)
    }
}

/// Testing choice. `tools` is derived from `approach` and never edited directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testing {
    #[serde(with = "crate::blank")]
    pub approach: Option<TestingApproach>,
    pub tools: Vec<String>,
}

impl Testing {
    pub fn for_approach(approach: TestingApproach) -> Self {
        Self {
            approach: Some(approach),
            tools: approach.tools().iter().map(|t| t.to_string()).collect(),
        }
    }
}
