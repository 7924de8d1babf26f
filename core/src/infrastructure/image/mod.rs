pub mod openai_image_client;
