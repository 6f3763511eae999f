// Licensed under the Apache-2.0 license

mod concurrency_test;
mod streaming_test;
