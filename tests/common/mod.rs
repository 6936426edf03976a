use std::io::Read;
use std::thread::JoinHandle;
use tiny_http::{Response, Server};

/// A request as the mock server saw it.
#[derive(Debug)]
pub struct Recorded {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serves the given replies in order, one per request, then stops.
pub struct MockServer {
    pub base_url: String,
    handle: JoinHandle<Vec<Recorded>>,
}

impl MockServer {
    pub fn start(replies: Vec<(u16, &'static str)>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("bind mock server");
        let port = server
            .server_addr()
            .to_ip()
            .expect("mock server has an IP address")
            .port();

        let handle = std::thread::spawn(move || {
            let mut recorded = Vec::new();
            for (status, body) in replies {
                let mut request = server.recv().expect("receive request");
                let mut content = String::new();
                request
                    .as_reader()
                    .read_to_string(&mut content)
                    .expect("read request body");
                recorded.push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_owned(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|header| (header.field.to_string(), header.value.to_string()))
                        .collect(),
                    body: content,
                });
                request
                    .respond(Response::from_string(body).with_status_code(status))
                    .expect("send response");
            }
            recorded
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            handle,
        }
    }

    pub fn finish(self) -> Vec<Recorded> {
        self.handle.join().expect("mock server panicked")
    }
}
