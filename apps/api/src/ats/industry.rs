//! Static industry and role keyword dictionaries.

use std::collections::HashSet;

type Dictionary = &'static [(&'static str, &'static [&'static str])];

const INDUSTRY_KEYWORDS: Dictionary = &[
    (
        "technology",
        &[
            "JavaScript",
            "Python",
            "React",
            "Node.js",
            "AWS",
            "Docker",
            "Kubernetes",
            "Microservices",
            "REST API",
            "GraphQL",
            "MongoDB",
            "PostgreSQL",
            "Redis",
            "Git",
            "CI/CD",
            "Agile",
            "Scrum",
            "TDD",
            "DevOps",
            "Cloud Computing",
        ],
    ),
    (
        "marketing",
        &[
            "Digital Marketing",
            "SEO",
            "SEM",
            "Google Analytics",
            "Social Media",
            "Content Marketing",
            "Email Marketing",
            "PPC",
            "Conversion Rate",
            "Marketing Automation",
            "Brand Management",
            "Campaign Management",
        ],
    ),
    (
        "finance",
        &[
            "Financial Analysis",
            "Financial Modeling",
            "Excel",
            "PowerBI",
            "Tableau",
            "Risk Management",
            "Portfolio Management",
            "Investment Analysis",
            "Financial Reporting",
            "Budgeting",
            "Forecasting",
            "Accounting",
        ],
    ),
    (
        "sales",
        &[
            "Lead Generation",
            "CRM",
            "Salesforce",
            "HubSpot",
            "Sales Funnel",
            "Cold Calling",
            "Relationship Building",
            "Negotiation",
            "Closing",
            "Pipeline Management",
            "Account Management",
            "Territory Management",
        ],
    ),
];

const ROLE_KEYWORDS: Dictionary = &[
    (
        "frontend",
        &["React", "Vue.js", "Angular", "HTML", "CSS", "TypeScript", "Webpack", "SASS"],
    ),
    (
        "backend",
        &["Node.js", "Python", "Java", "Express", "Django", "Spring", "API", "Database"],
    ),
    (
        "fullstack",
        &["MEAN", "MERN", "Full Stack", "Frontend", "Backend", "Database", "API"],
    ),
    (
        "manager",
        &["Leadership", "Team Management", "Project Management", "Strategy", "Planning"],
    ),
    (
        "senior",
        &["Mentoring", "Architecture", "System Design", "Technical Leadership", "Code Review"],
    ),
];

const GENERAL_KEYWORDS: &[&str] = &[
    "Communication",
    "Teamwork",
    "Problem Solving",
    "Leadership",
    "Project Management",
    "Time Management",
    "Critical Thinking",
    "Adaptability",
    "Innovation",
    "Collaboration",
];

fn lookup(table: Dictionary, key: Option<&str>) -> &'static [&'static str] {
    let Some(key) = key else {
        return &[];
    };
    let key = key.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, words)| *words)
        .unwrap_or(&[])
}

/// Industry keywords followed by role keywords, de-duplicated in order.
/// Falls back to a generic list when neither key is known.
pub fn industry_keywords(industry: Option<&str>, role: Option<&str>) -> Vec<String> {
    let matched: Vec<&str> = lookup(INDUSTRY_KEYWORDS, industry)
        .iter()
        .chain(lookup(ROLE_KEYWORDS, role))
        .copied()
        .collect();

    let source = if matched.is_empty() {
        GENERAL_KEYWORDS.to_vec()
    } else {
        matched
    };

    let mut seen = HashSet::new();
    source
        .into_iter()
        .filter(|k| seen.insert(*k))
        .map(str::to_string)
        .collect()
}
