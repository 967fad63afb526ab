use crate::yti::comments::config::Config;

const API_BASE_PATH: &str = "/api";
const API_VERSION: &str = "v1";
const API_PATH_ROUNDS: &str = "/commentrounds";
const API_PATH_THREADS: &str = "/commentthreads";

/// Builds canonical URIs, API URLs and web UI URLs from sequence ids.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    uri_host_address: String,
    api_root: String,
    public_url: String,
}

impl UrlGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            uri_host_address: config.uri.host_address(),
            api_root: format!(
                "{}{}{API_BASE_PATH}/{API_VERSION}",
                config.public_url, config.context_path
            ),
            public_url: config.public_url.clone(),
        }
    }

    pub fn round_uri(&self, round: u32) -> String {
        format!("{}/round/{round}", self.uri_host_address)
    }

    pub fn thread_uri(&self, round: u32, thread: u32) -> String {
        format!("{}/thread/{thread}", self.round_uri(round))
    }

    pub fn comment_uri(&self, round: u32, thread: u32, comment: u32) -> String {
        format!("{}/comment/{comment}", self.thread_uri(round, thread))
    }

    pub fn round_api_url(&self, round: u32) -> String {
        format!("{}{API_PATH_ROUNDS}/{round}", self.api_root)
    }

    pub fn thread_api_url(&self, round: u32, thread: u32) -> String {
        format!("{}{API_PATH_THREADS}/{thread}", self.round_api_url(round))
    }

    pub fn round_web_url(&self, round: u32) -> String {
        format!("{}/round;round={round}", self.public_url)
    }

    pub fn thread_web_url(&self, round: u32, thread: u32) -> String {
        format!("{};thread={thread}", self.round_web_url(round))
    }

    pub fn comment_web_url(&self, round: u32, thread: u32, comment: u32) -> String {
        format!("{};comment={comment}", self.thread_web_url(round, thread))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_uris() {
        let urls = UrlGenerator::new(&Config::default());

        assert_eq!(
            urls.comment_uri(3, 4, 5),
            "https://uri.suomi.fi/comments/round/3/thread/4/comment/5"
        );
        assert_eq!(
            urls.thread_api_url(3, 4),
            "http://localhost:9701/comments-api/api/v1/commentrounds/3/commentthreads/4"
        );
        assert_eq!(
            urls.comment_web_url(3, 4, 5),
            "http://localhost:9701/round;round=3;thread=4;comment=5"
        );
    }
}
