//! Demo conversations used when nothing has been persisted yet

use chrono::{DateTime, Duration, Utc};

use crate::types::{Conversation, Message, MessageStatus};

/// Build the seed dataset with timestamps relative to `now`.
pub fn seed_conversations(now: DateTime<Utc>) -> Vec<Conversation> {
    let ago = |minutes: i64| now - Duration::minutes(minutes);

    let mut familia = Conversation::new(
        "1",
        "Familia",
        "https://ui-avatars.com/api/?name=Familia&background=25d366&color=fff",
        ago(60 * 24 * 10),
    );
    familia.is_group = true;
    familia.is_favorite = true;
    familia.participants = Some(vec![
        "Mamá".to_string(),
        "Papá".to_string(),
        "Sofía".to_string(),
    ]);
    familia.unread = 2;
    familia.messages = vec![
        from("Mamá", "¿Vienen a comer el domingo?", ago(60 * 24 * 3)),
        reply("¡Sí! Llevo el postre", ago(60 * 24 * 3 - 5)),
        from("Papá", "Perfecto, compro carne para el asado", ago(60 * 26)),
        from("Sofía", "Yo llevo la ensalada 🥗", ago(45)),
    ];

    let mut lucas = Conversation::new(
        "2",
        "Lucas Fernández",
        "https://ui-avatars.com/api/?name=Lucas+Fernandez&background=random",
        ago(60 * 24 * 20),
    );
    lucas.unread = 1;
    lucas.messages = vec![
        from("Lucas Fernández", "¿Terminaste el informe?", ago(60 * 24 * 9)),
        reply("Casi, te lo mando mañana", ago(60 * 24 * 9 - 3)),
        from("Lucas Fernández", "Dale, gracias!", ago(20)),
    ];

    let mut valentina = Conversation::new(
        "3",
        "Valentina",
        "https://ui-avatars.com/api/?name=Valentina&background=random",
        ago(60 * 24 * 30),
    );
    valentina.is_favorite = true;
    let mut photo = reply("", ago(60 * 24 + 15));
    photo.image = Some(SEED_IMAGE.to_string());
    valentina.messages = vec![
        from("Valentina", "Mandame la foto de la playa", ago(60 * 24 + 30)),
        photo,
    ];

    let mut trabajo = Conversation::new(
        "4",
        "Equipo Frontend",
        "https://ui-avatars.com/api/?name=Equipo+Frontend&background=random",
        ago(60 * 24 * 40),
    );
    trabajo.is_group = true;
    trabajo.participants = Some(vec![
        "Martín".to_string(),
        "Camila".to_string(),
        "Diego".to_string(),
        "Julieta".to_string(),
    ]);
    trabajo.unread = 5;
    trabajo.messages = vec![
        from("Martín", "Daily a las 10", ago(60 * 24 * 5)),
        from("Camila", "Subí el PR del login", ago(60 * 24 * 2)),
        from("Diego", "Lo reviso hoy", ago(60 * 24 * 2 - 10)),
        from("Julieta", "Ojo con los estilos del modo oscuro", ago(90)),
    ];

    let mut conversations = vec![familia, lucas, valentina, trabajo];
    for conversation in &mut conversations {
        conversation.refresh_summary();
    }
    conversations
}

fn from(sender: &str, text: &str, at: DateTime<Utc>) -> Message {
    Message::incoming(Message::id_at(at), sender, text, at)
}

fn reply(text: &str, at: DateTime<Utc>) -> Message {
    let mut message = Message::outgoing("Me", text, None, at);
    message.id = Message::id_at(at);
    message.status = MessageStatus::Read;
    message
}

const SEED_IMAGE: &str = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";
