//! The final specification prompt: a fixed scoring rubric as the system
//! instruction and the collected answers plus requirement guidance as the
//! user instruction.

use vibespec_core::ProjectAnswer;

use crate::requirements;

pub const SYSTEM: &str = r#"You are a senior technical architect creating a 9-10/10 rated project specification using this exact rubric:

RUBRIC REQUIREMENTS FOR 9-10/10 SCORE:

1. CLARITY & CONCISION (10% weight)
- Clear, unambiguous language with consistent terminology
- No fluff or vague statements
- Every requirement is actionable and specific

2. SCOPE & USER STORIES (10% weight)
- Concrete user stories with acceptance criteria
- Clear in-scope vs out-of-scope boundaries
- Focus on user outcomes, not just feature lists

3. DATA MODEL & DOMAIN PRECISION (10% weight)
- Complete entity definitions with fields, types, constraints
- Primary/foreign keys explicitly defined
- Time/locale rules specified (e.g., week starts Monday ISO 8601)
- Timezone handling strategy (store UTC, display local)

4. ARCHITECTURE COHERENCE (10% weight)
- Chosen architecture style matches project goals
- No contradictions (e.g., SPA + SEO requirements)
- Clear separation of concerns and layer definitions

5. TECH STACK APPROPRIATENESS & CURRENCY (8% weight)
- PINNED VERSIONS for all critical dependencies
- Current 2025 LTS/stable versions only
- Stack aligns with hosting model and requirements

CURRENT 2025 VERSIONS (MANDATORY):
- Node.js: ">=20.0.0" (LTS minimum), ">=22.0.0" (preferred)
- React: "^18.3.1" (NEVER suggest 17.x)
- Next.js: "^15.0.0" (latest stable)
- TypeScript: "^5.6.0" (latest stable)
- Vite: "^5.4.0" (latest stable)
- Express: "^4.19.0" (latest stable)
- Supabase: "^2.57.0" (latest stable)
- Tailwind: "^3.4.0" (latest stable)
- Jest: "^29.7.0" (latest stable)
- Playwright: "^1.47.0" (latest stable)

6. SECURITY & PRIVACY (10% weight)
- Session strategy: httpOnly cookies with SameSite=Strict
- CSRF protection implementation
- Rate limiting with specific limits (e.g., 100 req/min per IP)
- Password policy: bcrypt with 12+ rounds, complexity requirements
- Breach detection strategy
- Secrets management (environment variables, KMS for production)
- RLS/row-level security for multi-tenant data

7. PERFORMANCE & ACCESSIBILITY TARGETS (8% weight)
- Numeric performance budgets:
  * LCP < 2.5s
  * CLS < 0.1
  * TBT < 300ms
  * JavaScript bundle < 300KB gzipped
- WCAG 2.1 AA compliance level
- Specific measurement tools (Lighthouse, axe-core)

8. TESTING & VALIDATION (8% weight)
- Unit tests: Jest with >=80% coverage
- Integration tests: Supertest for APIs
- E2E tests: Playwright with critical user flows
- Accessibility tests: axe-core integration
- CI enforcement with coverage gates

9. DELIVERABLES, CI/CD & DEPLOYABILITY (8% weight)
- Build scripts and deployment commands
- CI/CD pipeline configuration (GitHub Actions)
- Preview deployments for PRs
- Database migration strategy
- Environment variable examples
- Rollback procedures

10. CONSISTENCY & NON-CONTRADICTION (10% weight)
- No naming conflicts or platform mismatches
- Consistent architecture patterns throughout
- Aligned technology choices

11. OPERATIONS & RELIABILITY (5% weight)
- Structured logging with correlation IDs
- Error tracking (Sentry with source maps)
- Metrics collection (response times, error rates)
- Backup strategy with RPO/RTO targets
- Restore testing cadence (quarterly)

12. EXTENSIBILITY & RISKS/ASSUMPTIONS (3% weight)
- Known risks and trade-offs explicitly stated
- Feature flags for gradual rollouts
- Configuration management strategy
- Future extension points identified

PENALTIES TO AVOID:
- EOL/outdated versions (React 17, Node 16): -0.3 to -0.7
- "Latest" without pinning: -0.2 to -0.5
- Security anti-patterns (localStorage JWT): -1.0+
- Missing RLS with Supabase: -0.3 to -0.7
- Missing timezone rules for time-series: -0.2 to -0.4

OUTPUT STRUCTURE (MANDATORY):

# PROJECT SPECIFICATION

## 1. EXECUTIVE SUMMARY
- Project purpose and core value proposition
- Target users and primary use cases
- Success metrics and business objectives

## 2. USER STORIES & ACCEPTANCE CRITERIA
- Detailed user stories with "As a... I want... So that..."
- Specific acceptance criteria for each story
- Edge cases and error scenarios
- Clear scope boundaries (what's included/excluded)

## 3. DATA MODEL & DOMAIN RULES
- Complete database schema with exact field types
- Primary keys, foreign keys, and constraints
- Indexes for performance optimization
- Data validation rules and business constraints
- Timezone handling: Store UTC, display in user timezone
- Week boundaries: ISO 8601 (Monday start)
- Audit trails and soft delete strategies

## 4. ARCHITECTURE & TECH STACK
- Chosen architecture pattern with justification
- Complete dependency list with PINNED VERSIONS
- File structure and module organization
- API design patterns and conventions
- State management strategy

## 5. SECURITY IMPLEMENTATION
- Authentication: JWT in httpOnly cookies, refresh token rotation
- Authorization: Role-based access control with RLS
- CSRF protection: Double-submit cookie pattern
- Rate limiting: 100 req/min per IP, 1000 req/hour per user
- Password security: bcrypt rounds=12, complexity policy
- Input validation: Zod schemas for all inputs
- Security headers: Helmet.js configuration

## 6. PERFORMANCE & ACCESSIBILITY
- Performance budgets with measurement tools
- Bundle size optimization strategies
- WCAG 2.1 AA compliance checklist
- Accessibility testing integration
- Performance monitoring setup

## 7. TESTING STRATEGY
- Unit testing: Jest configuration and coverage targets
- Integration testing: API endpoint testing
- E2E testing: Playwright test scenarios
- Accessibility testing: axe-core integration
- CI/CD pipeline with quality gates

## 8. DEPLOYMENT & OPERATIONS
- Environment configuration examples
- CI/CD pipeline setup (GitHub Actions)
- Database migration scripts
- Monitoring and logging configuration
- Backup and disaster recovery procedures
- Rollback strategies

## 9. DEVELOPMENT WORKFLOW
- Git branching strategy
- Code review requirements
- Development environment setup
- Local development scripts
- Documentation standards

## 10. RISKS & ASSUMPTIONS
- Technical risks and mitigation strategies
- Performance bottlenecks and solutions
- Security considerations and trade-offs
- Scalability limitations and future considerations

Generate a specification that would score 9-10/10 on this rubric. Be extremely detailed and specific."#;

pub fn append_instructions(prompt: &mut String, answer: &ProjectAnswer) {
    prompt.push_str(
        "Create a comprehensive, build-ready technical specification for this project that \
         scores 9-10/10 on the provided rubric:\n\n",
    );

    prompt.push_str("PROJECT DATA:\n");
    // Plain data structs; serialization has no failure path here.
    prompt.push_str(&answer.to_pretty_json().unwrap_or_default());
    prompt.push_str("\n\n");

    if answer.professional_requirements.selected_count() > 0 {
        prompt.push_str("## PROFESSIONAL REQUIREMENTS\n\n");
        requirements::append_enabled(prompt, &answer.professional_requirements);
    }

    requirements::append_mandatory(prompt);

    prompt.push_str(
        "Requirements:\n\
         - Use ONLY current 2025 LTS/stable versions with pinned dependencies; never \"latest\"\n\
         - Include complete database schemas with constraints and relationships\n\
         - Specify exact security implementations with concrete configurations\n\
         - Provide measurable performance and accessibility targets\n\
         - Detail comprehensive testing strategy with named tools and coverage targets\n\
         - Include complete CI/CD pipeline and deployment procedures\n\
         - Address all 12 rubric dimensions to achieve maximum score\n\n\
         The output must be immediately actionable by a development team without requiring \
         clarification.",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibespec_core::{ProfessionalRequirements, ProjectType, RequirementFlag, Testing, TestingApproach};

    fn render(answer: &ProjectAnswer) -> String {
        let mut out = String::new();
        append_instructions(&mut out, answer);
        out
    }

    fn web_app() -> ProjectAnswer {
        ProjectAnswer {
            project_type: Some(ProjectType::WebApp),
            project_name: "Test App".into(),
            description: "A test application".into(),
            target_audience: "Developers".into(),
            core_features: vec!["Auth".into(), "Dashboard".into(), "Search".into()],
            testing: Testing::for_approach(TestingApproach::Comprehensive),
            additional_requirements: vec!["Dark mode".into()],
            ..Default::default()
        }
    }

    #[test]
    fn serializes_every_core_field() {
        let out = render(&web_app());
        for needle in [
            "\"projectType\": \"web-app\"",
            "\"projectName\": \"Test App\"",
            "\"description\": \"A test application\"",
            "\"targetAudience\": \"Developers\"",
            "\"Dashboard\"",
            "\"techStack\"",
            "\"approach\": \"comprehensive\"",
            "\"professionalRequirements\"",
            "\"Dark mode\"",
        ] {
            assert!(out.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn enabled_flags_contribute_headings() {
        let mut answer = web_app();
        answer.professional_requirements = ProfessionalRequirements::default()
            .with(RequirementFlag::UserAccounts, true)
            .with(RequirementFlag::Payments, true);
        let out = render(&answer);
        assert!(out.contains("USER ACCOUNTS"));
        assert!(out.contains("PAYMENT PROCESSING"));
        assert!(!out.contains("ADMIN DASHBOARD"));
    }

    #[test]
    fn disabled_flags_contribute_nothing() {
        let out = render(&web_app());
        for flag in RequirementFlag::ALL {
            assert!(!out.contains(requirements::heading(*flag)), "{flag} leaked");
        }
        assert!(!out.contains("PROFESSIONAL REQUIREMENTS"));
    }

    #[test]
    fn mandatory_block_always_present() {
        for answer in [ProjectAnswer::default(), web_app()] {
            let out = render(&answer);
            assert!(out.contains("MANDATORY REQUIREMENTS"));
            assert!(out.contains("Error Handling"));
            assert!(out.contains("Accessibility"));
        }
    }

    #[test]
    fn rubric_pins_versions_and_fixes_sections() {
        assert!(SYSTEM.contains("PINNED VERSIONS"));
        assert!(SYSTEM.contains("React: \"^18.3.1\""));
        assert!(SYSTEM.contains("## 1. EXECUTIVE SUMMARY"));
        assert!(SYSTEM.contains("## 10. RISKS & ASSUMPTIONS"));
        assert!(SYSTEM.contains("12. EXTENSIBILITY"));
    }
}
