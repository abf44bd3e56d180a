pub const DOWNLOADER: &str = "BBDown";
pub const URL_PLACEHOLDER: &str = "VIDEO_URL";
pub const DOWNLOAD_FLAGS: &str = "--video-only --audio-only";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolLink {
    pub label: &'static str,
    /// `None` when the project has not published a download location yet.
    pub url: Option<&'static str>,
}

pub const TOOL_LINKS: &[ToolLink] = &[
    ToolLink {
        label: "BBDown core (command line)",
        url: Some("https://github.com/nilaoda/BBDown/releases"),
    },
    ToolLink {
        label: "BBDown_GUI (recommended for beginners)",
        url: None,
    },
];

/// Build the display-only download command for the given link.
///
/// The link is substituted verbatim; nothing is quoted or escaped because the
/// result is shown to the user rather than handed to a process launcher.
pub fn compose_command(current_url: &str) -> String {
    let target = if current_url.is_empty() {
        URL_PLACEHOLDER
    } else {
        current_url
    };

    format!("{DOWNLOADER} {target} {DOWNLOAD_FLAGS}")
}
