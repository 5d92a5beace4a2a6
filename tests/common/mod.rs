#![allow(dead_code)]

pub mod mock_api {
    //! In-process stand-in for the reqres.in API.

    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::thread;
    use tiny_http::{Header, Response, Server};

    pub const CREATED_ID: &str = "481";
    pub const CREATED_AT: &str = "2024-05-01T10:20:30.123Z";
    const PER_PAGE: usize = 6;
    const TOTAL_USERS: usize = 12;

    /// How the mock answers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Behaviour {
        /// Serves the same fixtures as the public API
        Faithful,
        /// Serves subtly wrong data for every route
        Broken,
        /// Faithful, except users pages report these counts
        PageCount { total: u32, total_pages: u32 },
        /// Accepts connections and never answers
        Silent,
    }

    #[derive(Debug, Clone)]
    pub struct RecordedRequest {
        pub method: String,
        pub url: String,
        pub content_type: Option<String>,
        pub body: String,
    }

    pub struct MockApi {
        pub base_url: String,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl MockApi {
        pub fn start(behaviour: Behaviour) -> Self {
            let server = Server::http("127.0.0.1:0").expect("bind mock server");
            let port = server
                .server_addr()
                .to_ip()
                .expect("mock server listens on an IP socket")
                .port();
            let requests = Arc::new(Mutex::new(Vec::new()));
            let log = Arc::clone(&requests);

            thread::spawn(move || {
                let mut held = Vec::new();
                for mut request in server.incoming_requests() {
                    if behaviour == Behaviour::Silent {
                        held.push(request);
                        continue;
                    }
                    let mut body = String::new();
                    let _ = request.as_reader().read_to_string(&mut body);
                    let method = request.method().to_string();
                    let url = request.url().to_string();
                    let content_type = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string());

                    let (status, payload) = route(behaviour, &method, &url, &body);
                    log.lock().push(RecordedRequest {
                        method,
                        url,
                        content_type,
                        body,
                    });

                    let response = Response::from_string(payload)
                        .with_status_code(status)
                        .with_header(
                            Header::from_bytes(
                                &b"Content-Type"[..],
                                &b"application/json; charset=utf-8"[..],
                            )
                            .expect("static header"),
                        );
                    let _ = request.respond(response);
                }
            });

            Self {
                base_url: format!("http://127.0.0.1:{port}"),
                requests,
            }
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().clone()
        }

        pub fn requests_to(&self, url: &str) -> Vec<RecordedRequest> {
            self.requests().into_iter().filter(|r| r.url == url).collect()
        }
    }

    fn user(id: usize) -> Value {
        const NAMES: [(&str, &str); TOTAL_USERS] = [
            ("George", "Bluth"),
            ("Janet", "Weaver"),
            ("Emma", "Wong"),
            ("Eve", "Holt"),
            ("Charles", "Morris"),
            ("Tracey", "Ramos"),
            ("Michael", "Lawson"),
            ("Lindsay", "Ferguson"),
            ("Tobias", "Funke"),
            ("Byron", "Fields"),
            ("George", "Edwards"),
            ("Rachel", "Howell"),
        ];
        let (first, last) = NAMES[id - 1];
        json!({
            "id": id,
            "email": format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
            "first_name": first,
            "last_name": last,
            "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
        })
    }

    fn support() -> Value {
        json!({
            "url": "https://contentcaddy.io?utm_source=reqres",
            "text": "Tired of writing endless social media content?"
        })
    }

    fn users_page(page: usize, behaviour: Behaviour) -> Value {
        let total_pages = TOTAL_USERS.div_ceil(PER_PAGE);
        let first = (page.saturating_sub(1)) * PER_PAGE + 1;
        let mut data: Vec<Value> = (first..first + PER_PAGE)
            .filter(|id| *id <= TOTAL_USERS)
            .map(user)
            .collect();
        if behaviour == Behaviour::Broken && page == 1 {
            data[1] = user(1);
        }
        let data = if behaviour == Behaviour::Broken && page == 2 {
            json!(7)
        } else {
            Value::Array(data)
        };
        let (total, total_pages) = match behaviour {
            Behaviour::PageCount { total, total_pages } => (total as usize, total_pages as usize),
            _ => (TOTAL_USERS, total_pages),
        };
        json!({
            "page": page,
            "per_page": PER_PAGE,
            "total": total,
            "total_pages": total_pages,
            "data": data,
            "support": support()
        })
    }

    fn route(behaviour: Behaviour, method: &str, url: &str, body: &str) -> (u16, String) {
        let broken = behaviour == Behaviour::Broken;
        let not_found = || {
            let body = if broken { r#"{"error":"not found"}"# } else { "{}" };
            (404, body.to_string())
        };

        let Some(path) = url.strip_prefix("/api/") else {
            return not_found();
        };
        let (path, query) = path.split_once('?').unwrap_or((path, ""));

        match (method, path) {
            ("GET", "users") => {
                let page = query
                    .split('&')
                    .find_map(|kv| kv.strip_prefix("page="))
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(1);
                (200, users_page(page, behaviour).to_string())
            }
            ("GET", p) if p.starts_with("users/") => match p["users/".len()..].parse::<usize>() {
                Ok(id) if (1..=TOTAL_USERS).contains(&id) => {
                    let mut data = user(id);
                    if broken {
                        data["last_name"] = json!("Holt");
                    }
                    (200, json!({"data": data, "support": support()}).to_string())
                }
                _ => not_found(),
            },
            ("POST", "users") => {
                let mut created: Value = serde_json::from_str(body).unwrap_or_else(|_| json!({}));
                created["id"] = json!(if broken { "" } else { CREATED_ID });
                created["createdAt"] = json!(CREATED_AT);
                (201, created.to_string())
            }
            ("GET", "unknown/2") => {
                let id = if broken { json!("2") } else { json!(2) };
                let resource = json!({
                    "data": {
                        "id": id,
                        "name": "fuchsia rose",
                        "year": 2001,
                        "color": "#C74375",
                        "pantone_value": "17-2031"
                    },
                    "support": support()
                });
                (200, resource.to_string())
            }
            _ => not_found(),
        }
    }
}

pub mod net {
    use std::net::TcpListener;

    /// A local URL nothing is listening on.
    pub fn closed_port_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
        let port = listener.local_addr().expect("probe addr").port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }
}
