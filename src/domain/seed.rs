use super::models::{Pet, PetType};

/// The fixed list of adoptable pets written at startup.
pub fn seed_pets() -> Vec<Pet> {
    vec![
        seed_cat(
            "1",
            "Mittens",
            "Domestic Shorthair",
            2,
            "Sweet and playful cat who loves to cuddle and chase toys.",
            "https://images.unsplash.com/photo-1514888286974-6c03e2ca1dba?w=400",
        ),
        seed_cat(
            "2",
            "Shadow",
            "White Domestic Shorthair",
            3,
            "Mysterious and elegant black cat with a gentle personality.",
            "https://images.unsplash.com/photo-1557246565-8a3d3ab5d7f6?w=400",
        ),
        seed_cat(
            "3",
            "Luna",
            "Siamese",
            1,
            "Beautiful Siamese cat with striking blue eyes and a talkative nature.",
            "https://images.unsplash.com/photo-1513360371669-4adf3dd7dff8?w=400",
        ),
        seed_cat(
            "4",
            "Ginger",
            "Orange Tabby",
            4,
            "Loving orange tabby with a big personality and lots of energy.",
            "https://images.unsplash.com/photo-1574158622682-e40e69881006?w=400",
        ),
        seed_cat(
            "5",
            "Snowball",
            "White Persian",
            2,
            "Fluffy white Persian cat who loves to be pampered and groomed.",
            "https://images.unsplash.com/photo-1518791841217-8f162f1e1131?w=400",
        ),
        seed_cat(
            "6",
            "Tiger",
            "Bengal",
            1,
            "Energetic Bengal cat with beautiful spotted coat and wild spirit.",
            "https://images.unsplash.com/photo-1640249029702-7ad678dc51cd?q=80&w=985",
        ),
    ]
}

fn seed_cat(id: &str, name: &str, breed: &str, age: u32, description: &str, image_url: &str) -> Pet {
    Pet {
        id: id.to_string(),
        name: name.to_string(),
        pet_type: PetType::Cat,
        breed: breed.to_string(),
        age,
        description: description.to_string(),
        image_url: image_url.to_string(),
        available: true,
    }
}
