pub mod mock_download_client;
pub mod mock_git_client;
