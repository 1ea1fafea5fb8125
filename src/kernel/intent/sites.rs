#[derive(Debug, PartialEq, Eq)]
pub struct Site {
    pub key: &'static str,
    pub url: &'static str,
    pub display_name: &'static str,
}

pub const SITES: &[Site] = &[
    Site {
        key: "youtube",
        url: "https://www.youtube.com",
        display_name: "YouTube",
    },
    Site {
        key: "facebook",
        url: "https://www.facebook.com",
        display_name: "Facebook",
    },
    Site {
        key: "instagram",
        url: "https://www.instagram.com",
        display_name: "Instagram",
    },
    Site {
        key: "whatsapp",
        url: "https://web.whatsapp.com",
        display_name: "WhatsApp",
    },
    Site {
        key: "gmail",
        url: "https://mail.google.com",
        display_name: "Gmail",
    },
    Site {
        key: "google",
        url: "https://www.google.com",
        display_name: "Google",
    },
    Site {
        key: "twitter",
        url: "https://twitter.com",
        display_name: "Twitter",
    },
    Site {
        key: "netflix",
        url: "https://www.netflix.com",
        display_name: "Netflix",
    },
    Site {
        key: "amazon",
        url: "https://www.amazon.com",
        display_name: "Amazon",
    },
    Site {
        key: "wikipedia",
        url: "https://www.wikipedia.org",
        display_name: "Wikipedia",
    },
];

/// First site, in directory order, named by an "open <site>" phrase.
pub fn find_opened(message: &str) -> Option<&'static Site> {
    SITES.iter().find(|site| message.contains(&format!("open {}", site.key)))
}

pub const WEB_SEARCH_URL: &str = "https://www.google.com/search";
pub const MEDIA_SEARCH_URL: &str = "https://www.youtube.com/results";
