//! Rustls for HTTP clients.

use async_openai as _;
use reqwest as _;
