//! Selects the TLS implementation for HTTP clients. Depending on this
//! crate enables the TLS features of `reqwest` and `async-openai`.
