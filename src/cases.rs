//! Demo prospects and URLs shared by the binaries.

/// A labelled URL for the demo runs.
#[derive(Debug, Clone, Copy)]
pub struct DemoCase {
    pub label: &'static str,
    pub url: &'static str,
}

/// A named prospect for the research demos.
#[derive(Debug, Clone, Copy)]
pub struct DemoProspect {
    pub name: &'static str,
    pub url: &'static str,
}

/// Clean URL then a broken variant of the same profile. The chained workflow
/// fails on the second; the agent recovers from it.
pub const DEMO_PAIR: [DemoCase; 2] = [
    DemoCase {
        label: "clean URL",
        url: "https://www.linkedin.com/in/jenhsunhuang/",
    },
    DemoCase {
        label: "broken URL (wrong handle, no scheme)",
        url: "linkedin.com/in/jenhsun-huang",
    },
];

pub const DEMO_PROSPECT: DemoProspect = DemoProspect {
    name: "Bayram Annakov - Instructor",
    url: "https://linkedin.com/in/bayramannakov",
};

pub const DEMO_PROSPECTS_ALT: [DemoProspect; 2] = [
    DemoProspect {
        name: "Satya Nadella - Microsoft CEO",
        url: "https://www.linkedin.com/in/satyanadella/",
    },
    DemoProspect {
        name: "Demis Hassabis - DeepMind CEO",
        url: "https://www.linkedin.com/in/demishassabis/",
    },
];

/// Single URL for side-by-side comparison runs. Kept cheap: one profile,
/// both approaches.
pub const QUICK_TEST_URL: &str = "https://www.linkedin.com/in/jenhsunhuang/";

/// Malformed URLs that exercise the agent's self-correction.
pub const EDGE_CASE_URLS: [DemoCase; 5] = [
    DemoCase {
        label: "missing scheme",
        url: "www.linkedin.com/in/jenhsunhuang/",
    },
    DemoCase {
        label: "missing www",
        url: "https://linkedin.com/in/jenhsunhuang/",
    },
    DemoCase {
        label: "stray hyphen in handle",
        url: "https://www.linkedin.com/in/jen-hsunhuang/",
    },
    DemoCase {
        label: "double trailing slash",
        url: "https://www.linkedin.com/in/jenhsunhuang//",
    },
    DemoCase {
        label: "unknown handle",
        url: "https://www.linkedin.com/in/jenhsunhuang12345/",
    },
];
