pub mod stream_presence;
