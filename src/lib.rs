pub mod shared {
    pub mod core {
        pub mod clock;
        pub mod envelope;
    }
    pub mod infrastructure {
        pub mod mailer;
        pub mod sheets;
    }
}

pub mod modules {
    pub mod attendance {
        pub mod core {
            pub mod check_kind;
            pub mod columns;
            pub mod coordinates;
            pub mod errors;
            pub mod row_index;
            pub mod time_format;
        }
        pub mod use_cases {
            pub mod record_check {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_logs {
                pub mod handler;
                pub mod query;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod update_log {
                pub mod command;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod delete_log {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod send_report {
                pub mod command;
                pub mod handler;
                pub mod pdf;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod dashboard {
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;

#[cfg(test)]
pub mod tests {
    pub mod fixtures;

    pub mod e2e {
        pub mod check_and_list_flow_tests;
        pub mod admin_routes_tests;
    }
}
