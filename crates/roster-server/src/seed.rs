//! Demo records for an empty store.

use roster_core::{
  person::{NewAddress, NewPerson},
  store::PersonStore,
};

fn samples() -> [NewPerson; 2] {
  [
    NewPerson {
      name:        "João Silva".into(),
      email:       "joao.silva@email.com".into(),
      phone:       "(11) 99999-9999".into(),
      national_id: "123.456.789-09".into(),
      birth_date:  "1990-05-15".into(),
      address:     NewAddress {
        postal_code: "01310-100".into(),
        number:      "1000".into(),
        street:      Some("Avenida Paulista".into()),
        complement:  Some("Apto 101".into()),
        district:    Some("Bela Vista".into()),
        city:        Some("São Paulo".into()),
        state_name:  Some("São Paulo".into()),
        state_code:  Some("SP".into()),
      },
    },
    NewPerson {
      name:        "Maria Santos".into(),
      email:       "maria.santos@email.com".into(),
      phone:       "(21) 88888-8888".into(),
      national_id: "987.654.321-00".into(),
      birth_date:  "1985-12-03".into(),
      address:     NewAddress {
        postal_code: "22071-900".into(),
        number:      "500".into(),
        street:      Some("Avenida Atlântica".into()),
        complement:  None,
        district:    Some("Copacabana".into()),
        city:        Some("Rio de Janeiro".into()),
        state_name:  Some("Rio de Janeiro".into()),
        state_code:  Some("RJ".into()),
      },
    },
  ]
}

/// Insert the sample people if `store` holds no records. Returns how many
/// were created.
pub async fn seed_samples<S: PersonStore>(store: &S) -> Result<usize, S::Error> {
  if store.stats().await?.total > 0 {
    return Ok(0);
  }

  let mut created = 0;
  for person in samples() {
    store.create(person).await?;
    created += 1;
  }
  Ok(created)
}
