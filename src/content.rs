//! Static resume data rendered by the page.

pub const OWNER_NAME: &str = "Ankit Ranjan";
pub const RESUME_FILE_NAME: &str = "Ankit_Ranjan_Resume.pdf";

/// Images the intro waits on before revealing the page.
pub const PRELOAD_ASSETS: [&str; 4] = ["/bg.png", "/sky.png", "/ank.png", "/ank2.png"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentItem {
    pub title: &'static str,
    pub organization: &'static str,
    pub period: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: &'static str,
    pub level: u8,
    pub icon: &'static str,
}

impl SkillEntry {
    const fn new(name: &'static str, level: u8, icon: &'static str) -> Self {
        Self { name, level, icon }
    }

    pub fn level_percent(&self) -> String {
        format!("{}%", self.level.min(100))
    }
}

/// Page regions a scroll binding can observe or a nav link can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Portfolio,
    Experience,
    Skills,
    Contact,
}

impl Section {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Portfolio => "portfolio",
            Self::Experience => "experience",
            Self::Skills => "skills",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Profile => "About",
            Self::Portfolio => "Experience",
            Self::Experience => "Roles",
            Self::Skills => "Skills",
            Self::Contact => "Contact",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SocialLink {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        label: "LinkedIn",
        href: "https://linkedin.com/in/ankitrj3",
        icon: "ri-linkedin-line",
    },
    SocialLink {
        label: "GitHub",
        href: "https://github.com/ankitrj3",
        icon: "ri-github-line",
    },
    SocialLink {
        label: "Email",
        href: "mailto:ankitrobinranjan@gmail.com",
        icon: "ri-mail-line",
    },
];

pub const EXPERIENCES: [ContentItem; 2] = [
    ContentItem {
        title: "Software Engineer Intern",
        organization: "Lumen IT Services LLC",
        period: "Jul 2025 - Present",
        description: "Working on backend and cloud development projects using Java Spring Boot, AWS, and DevOps tools. Contributing to scalable REST API development, CI/CD pipelines, and deployment automation.",
        tags: &["Java", "Spring Boot", "AWS", "Docker", "Kubernetes", "CI/CD"],
    },
    ContentItem {
        title: "Game Development Intern",
        organization: "CipherSchools",
        period: "Jun 2024 - Aug 2024",
        description: "Completed a game development internship focusing on Unity and C# scripting. Built playable games, applied game physics, and explored 3D modeling and animation with Blender.",
        tags: &["Unity", "C#", "Game Physics", "Blender 3D"],
    },
];

pub const SKILLS: [SkillEntry; 28] = [
    SkillEntry::new("Java", 93, "ri-code-s-slash-line"),
    SkillEntry::new("JavaScript", 95, "ri-javascript-line"),
    SkillEntry::new("TypeScript", 85, "ri-code-s-slash-line"),
    SkillEntry::new("Python", 82, "ri-code-line"),
    SkillEntry::new("C#", 80, "ri-code-s-slash-line"),
    SkillEntry::new("Spring Boot", 90, "ri-leaf-line"),
    SkillEntry::new("Node.js", 88, "ri-nodejs-line"),
    SkillEntry::new("Express.js", 85, "ri-server-line"),
    SkillEntry::new("RESTful APIs", 90, "ri-links-line"),
    SkillEntry::new("React", 92, "ri-reactjs-line"),
    SkillEntry::new("Next.js", 85, "ri-nextjs-line"),
    SkillEntry::new("HTML5", 90, "ri-html5-line"),
    SkillEntry::new("CSS3", 88, "ri-css3-line"),
    SkillEntry::new("Responsive Design", 87, "ri-layout-line"),
    SkillEntry::new("AWS", 78, "ri-cloud-line"),
    SkillEntry::new("Azure", 72, "ri-cloud-fill"),
    SkillEntry::new("Terraform", 70, "ri-tools-line"),
    SkillEntry::new("Infrastructure as Code", 75, "ri-settings-3-line"),
    SkillEntry::new("Docker", 75, "ri-container-line"),
    SkillEntry::new("Kubernetes", 73, "ri-apps-line"),
    SkillEntry::new("CI/CD", 80, "ri-git-commit-line"),
    SkillEntry::new("Microservices", 82, "ri-stack-line"),
    SkillEntry::new("Unity 3D", 78, "ri-gamepad-line"),
    SkillEntry::new("Game Physics", 74, "ri-shapes-line"),
    SkillEntry::new("Blender 3D", 70, "ri-cube-3-line"),
    SkillEntry::new("MongoDB", 80, "ri-database-2-line"),
    SkillEntry::new("Git", 90, "ri-git-branch-line"),
    SkillEntry::new("GSAP", 85, "ri-magic-line"),
];

/// Skills shown for the given expansion state.
pub fn visible_skills(skills: &[SkillEntry], expanded: bool, limit: usize) -> &[SkillEntry] {
    if expanded {
        skills
    } else {
        &skills[..limit.min(skills.len())]
    }
}
