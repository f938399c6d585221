pub mod mock_feeds;
