use crate::models::resume::{
    CategorizedSkills, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, Skills,
};
use serde_json::Map;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Fixed demonstration resume loaded by the "Sample" action.
pub fn sample_resume() -> ResumeDocument {
    ResumeDocument {
        personal: PersonalInfo {
            full_name: "Alex Morgan".to_string(),
            email: "alex.morgan@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            location: "San Francisco, CA".to_string(),
            title: "Senior Software Engineer".to_string(),
            website: "alexmorgan.dev".to_string(),
            linkedin: "linkedin.com/in/alexmorgan".to_string(),
            github: "github.com/alexmorgan".to_string(),
        },
        summary: "Results-driven software engineer with 6+ years of experience building \
                  scalable web applications. Expert in React, Node.js, and Cloud Architecture. \
                  Passionate about clean code and user experience."
            .to_string(),
        experience: vec![
            ExperienceEntry {
                id: 1,
                company: "TechCorp Inc.".to_string(),
                role: "Senior Frontend Developer".to_string(),
                date: "2021 - Present".to_string(),
                description: "Led a team of 5 developers to rebuild the core dashboard.\n\
                              Improved performance by 40% using React Server Components.\n\
                              Mentored junior developers and established code quality standards."
                    .to_string(),
            },
            ExperienceEntry {
                id: 2,
                company: "StartupX".to_string(),
                role: "Full Stack Developer".to_string(),
                date: "2019 - 2021".to_string(),
                description: "Built the MVP from scratch using MERN stack.\n\
                              Scaled the application to 100k+ active users.\n\
                              Integrated Stripe payments and Twilio notifications."
                    .to_string(),
            },
        ],
        education: vec![EducationEntry {
            id: 1,
            school: "University of Technology".to_string(),
            degree: "B.S. Computer Science".to_string(),
            date: "2015 - 2019".to_string(),
            description: "Graduated with Honors. President of the Coding Club.".to_string(),
        }],
        projects: vec![ProjectEntry {
            id: 1,
            name: "AI Resume Builder".to_string(),
            description: "A premium resume building tool using React and OpenAI.\n\
                          Features include real-time preview, PDF export, and ATS optimization."
                .to_string(),
            tech_stack: Vec::new(),
            live_url: "github.com/alexmorgan/resume-builder".to_string(),
            github_url: String::new(),
        }],
        skills: Skills::Categorized(CategorizedSkills {
            technical: strings(&[
                "React",
                "TypeScript",
                "Node.js",
                "Next.js",
                "Tailwind CSS",
                "AWS",
                "Docker",
                "GraphQL",
            ]),
            soft: Vec::new(),
            tools: Vec::new(),
        }),
        extra: Map::new(),
    }
}

/// Skill set offered by the "Suggest Skills" action.
pub fn suggested_skills() -> CategorizedSkills {
    CategorizedSkills {
        technical: strings(&["TypeScript", "React", "Node.js", "PostgreSQL", "GraphQL"]),
        soft: strings(&["Team Leadership", "Problem Solving"]),
        tools: strings(&["Git", "Docker", "AWS"]),
    }
}
